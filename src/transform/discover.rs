//! Reference discovery.
//!
//! Walks the parsed tree once, collecting markdown image entries and raw
//! embedded-markup entries in document order. Each entry snapshots the
//! node's fields before any mutation happens, plus whether an ancestor
//! already links it. Nothing is mutated in this phase.

use regex::Regex;

use crate::model::{NodeId, NodeKind, Tree};

/// Snapshot of a markdown image or image-reference node.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveredImage {
    /// An `image` node with a direct URL
    Direct {
        /// Image source
        url: String,
        /// Alternative text
        alt: Option<String>,
        /// Advisory title
        title: Option<String>,
    },

    /// An `imageReference` node, resolved later through the definition table
    Reference {
        /// Reference identifier
        identifier: String,
        /// Alt text on the referencing site, overriding the definition's
        alt: Option<String>,
    },
}

/// One markdown-syntax image entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// Node to mutate on success (the referencing node, for references)
    pub id: NodeId,

    /// Whether an ancestor already links this image
    pub in_link: bool,

    /// Field snapshot taken at discovery time
    pub image: DiscoveredImage,
}

/// One raw-HTML or embedded-markup entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedEntry {
    /// Node to mutate on success
    pub id: NodeId,

    /// Whether an ancestor already links this markup
    pub in_link: bool,

    /// Literal markup snapshot
    pub value: String,
}

/// Collect image and embedded entries in document order.
pub fn discover(tree: &Tree) -> (Vec<ImageEntry>, Vec<EmbeddedEntry>) {
    let anchor_open = Regex::new(r"<a[\s>]").unwrap();
    let mut images = Vec::new();
    let mut embedded = Vec::new();

    tree.visit_with_ancestors(|id, ancestors| match &tree.node(id).kind {
        NodeKind::Image { url, alt, title } => images.push(ImageEntry {
            id,
            in_link: in_link(tree, ancestors, &anchor_open),
            image: DiscoveredImage::Direct {
                url: url.clone(),
                alt: alt.clone(),
                title: title.clone(),
            },
        }),
        NodeKind::ImageReference { identifier, alt } => images.push(ImageEntry {
            id,
            in_link: in_link(tree, ancestors, &anchor_open),
            image: DiscoveredImage::Reference {
                identifier: identifier.clone(),
                alt: alt.clone(),
            },
        }),
        NodeKind::Html { value } | NodeKind::Embedded { value } => embedded.push(EmbeddedEntry {
            id,
            in_link: in_link(tree, ancestors, &anchor_open),
            value: value.clone(),
        }),
        _ => {}
    });

    (images, embedded)
}

/// True iff any ancestor is a link node, or raw markup that opens an anchor.
fn in_link(tree: &Tree, ancestors: &[NodeId], anchor_open: &Regex) -> bool {
    ancestors.iter().any(|&id| match &tree.node(id).kind {
        NodeKind::Link { .. } => true,
        NodeKind::Html { value } | NodeKind::Embedded { value } => anchor_open.is_match(value),
        _ => false,
    })
}
