//! Arena-backed document tree.
//!
//! The tree mirrors the markdown AST the host parser produces: nodes are
//! stored in a flat arena and addressed by [`NodeId`], so a transform can
//! capture ids during an immutable walk and mutate the captured nodes later
//! without positional indexing.

use serde::{Deserialize, Serialize};

/// Identifier of a node within a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

/// The kind of a document node, with its node-specific fields.
///
/// Serialization is `type`-tagged (`{"type": "image", "url": ...}`) so trees
/// interchange with mdast-style JSON produced by host-side parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    /// Document root.
    Root,

    /// Block container for phrasing content.
    Paragraph,

    /// Plain text.
    Text {
        /// Literal text content
        value: String,
    },

    /// Hyperlink around phrasing content.
    Link {
        /// Link destination
        url: String,
        /// Advisory title
        #[serde(default)]
        title: Option<String>,
    },

    /// Inline image with a direct URL.
    Image {
        /// Image source
        url: String,
        /// Alternative text
        #[serde(default)]
        alt: Option<String>,
        /// Advisory title
        #[serde(default)]
        title: Option<String>,
    },

    /// Reference-style image, resolved through a [`Definition`](NodeKind::Definition).
    ImageReference {
        /// Reference identifier (case-insensitive)
        identifier: String,
        /// Alternative text on the referencing site
        #[serde(default)]
        alt: Option<String>,
    },

    /// Reference definition (`[id]: url "title"`).
    Definition {
        /// Reference identifier (case-insensitive)
        identifier: String,
        /// Defined destination
        url: String,
        /// Advisory title
        #[serde(default)]
        title: Option<String>,
    },

    /// Raw embedded markup, emitted verbatim by downstream renderers.
    Html {
        /// Unparsed markup
        value: String,
    },

    /// Embedded JSX-flavored markup; discovered and spliced like raw HTML.
    Embedded {
        /// Unparsed markup
        value: String,
    },
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node kind and fields
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Child node ids, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

/// A parsed document tree.
///
/// The node at index 0 is the root. Trees deserialized from host JSON must
/// preserve that convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree containing only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                children: Vec::new(),
            }],
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new node as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first pre-order walk in document order.
    ///
    /// The visitor receives each node's id and its ancestor chain, root
    /// first, excluding the node itself. No node is mutated by the walk.
    pub fn visit_with_ancestors<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &[NodeId]),
    {
        let mut ancestors = Vec::new();
        self.visit_inner(self.root(), &mut ancestors, &mut visitor);
    }

    fn visit_inner<F>(&self, id: NodeId, ancestors: &mut Vec<NodeId>, visitor: &mut F)
    where
        F: FnMut(NodeId, &[NodeId]),
    {
        visitor(id, ancestors);
        ancestors.push(id);
        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            self.visit_inner(child, ancestors, visitor);
        }
        ancestors.pop();
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> NodeKind {
        NodeKind::Text {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_push_and_access() {
        let mut tree = Tree::new();
        let para = tree.push(tree.root(), NodeKind::Paragraph);
        let t = tree.push(para, text("hello"));

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.node(tree.root()).children, vec![para]);
        assert_eq!(tree.node(para).children, vec![t]);
        assert!(matches!(tree.node(t).kind, NodeKind::Text { .. }));
    }

    #[test]
    fn test_walk_order_and_ancestors() {
        let mut tree = Tree::new();
        let para = tree.push(tree.root(), NodeKind::Paragraph);
        let link = tree.push(
            para,
            NodeKind::Link {
                url: "/about".to_string(),
                title: None,
            },
        );
        let inner = tree.push(link, text("about"));
        let after = tree.push(para, text("tail"));

        let mut visited = Vec::new();
        tree.visit_with_ancestors(|id, ancestors| {
            visited.push((id, ancestors.to_vec()));
        });

        let ids: Vec<NodeId> = visited.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![tree.root(), para, link, inner, after]);

        let (_, inner_ancestors) = &visited[3];
        assert_eq!(inner_ancestors, &vec![tree.root(), para, link]);
    }

    #[test]
    fn test_mutate_by_captured_id() {
        let mut tree = Tree::new();
        let img = tree.push(
            tree.root(),
            NodeKind::Image {
                url: "./pic.jpg".to_string(),
                alt: None,
                title: None,
            },
        );

        tree.node_mut(img).kind = NodeKind::Html {
            value: "<span></span>".to_string(),
        };
        assert!(matches!(tree.node(img).kind, NodeKind::Html { .. }));
    }

    #[test]
    fn test_serde_type_tags() {
        let mut tree = Tree::new();
        tree.push(
            tree.root(),
            NodeKind::ImageReference {
                identifier: "logo".to_string(),
                alt: Some("the logo".to_string()),
            },
        );

        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"type\":\"imageReference\""));

        let back: Tree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
