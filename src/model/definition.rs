//! Reference-definition table.

use std::collections::HashMap;

use super::tree::{NodeId, NodeKind, Tree};

/// Map from normalized reference identifier to the node that defines it.
///
/// Built once per document before any mutation begins, and read-only for the
/// rest of the pass, so in-place node mutation cannot corrupt identifier
/// resolution for entries processed later. Identifiers compare
/// case-insensitively with interior whitespace collapsed; the first
/// definition for an identifier wins.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    map: HashMap<String, NodeId>,
}

impl DefinitionTable {
    /// Collect every definition node in the tree.
    pub fn build(tree: &Tree) -> Self {
        let mut map: HashMap<String, NodeId> = HashMap::new();
        tree.visit_with_ancestors(|id, _| {
            if let NodeKind::Definition { identifier, .. } = &tree.node(id).kind {
                map.entry(normalize(identifier)).or_insert(id);
            }
        });
        Self { map }
    }

    /// Look up the definition node for an identifier.
    pub fn get(&self, identifier: &str) -> Option<NodeId> {
        self.map.get(&normalize(identifier)).copied()
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the document has no definitions at all.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn normalize(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(identifier: &str, url: &str) -> NodeKind {
        NodeKind::Definition {
            identifier: identifier.to_string(),
            url: url.to_string(),
            title: None,
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let mut tree = Tree::new();
        let def = tree.push(tree.root(), definition("logo", "./logo.png"));

        let table = DefinitionTable::build(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("logo"), Some(def));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut tree = Tree::new();
        let def = tree.push(tree.root(), definition("My  Logo", "./logo.png"));

        let table = DefinitionTable::build(&tree);
        assert_eq!(table.get("my logo"), Some(def));
        assert_eq!(table.get("MY LOGO"), Some(def));
    }

    #[test]
    fn test_first_definition_wins() {
        let mut tree = Tree::new();
        let first = tree.push(tree.root(), definition("logo", "./a.png"));
        tree.push(tree.root(), definition("LOGO", "./b.png"));

        let table = DefinitionTable::build(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("logo"), Some(first));
    }
}
