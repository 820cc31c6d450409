//! The document transform pipeline.
//!
//! One call to [`transform`] runs the four phases over a parsed tree:
//! reference discovery, reference resolution, markup generation, and tree
//! splicing. Per-image work is issued as independently-resolving futures and
//! joined with an all-complete barrier per phase; only the image-service
//! call suspends. The transform itself never fails a document — broken
//! references mean fewer mutations, not errors.

mod discover;
mod markup;
mod options;
mod resolve;
mod splice;

pub use options::{
    CaptionSource, Loading, ShowCaptions, TransformOptions, WrapperStyle, FIGCAPTION_CLASS,
    FIGURE_CLASS, IMAGE_BACKGROUND_CLASS, IMAGE_CLASS, IMAGE_LINK_CLASS, IMAGE_WRAPPER_CLASS,
};

use futures::future::join_all;

use crate::model::{DefinitionTable, DocumentFile, FileNode, NodeId, NodeKind, Tree};
use crate::service::{CaptionCompiler, ImageService};

/// Collaborators for one document pass.
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
    /// Candidate files, matched by exact absolute path
    pub files: &'a [FileNode],

    /// The file backing this document, if the host resolved one
    pub document: Option<&'a DocumentFile>,

    /// The external image service
    pub service: &'a dyn ImageService,

    /// Optional markdown caption compiler
    pub compiler: Option<&'a dyn CaptionCompiler>,
}

/// Transform every eligible image reference in the tree.
///
/// Returns the ids of the mutated nodes, markdown-syntax results first,
/// then raw-HTML results. The definition table is fully built before any
/// node is touched, and every mutation is applied to the captured node id
/// after its phase's barrier, so completion order never affects the result.
pub async fn transform(
    tree: &mut Tree,
    ctx: &TransformContext<'_>,
    options: &TransformOptions,
) -> Vec<NodeId> {
    let definitions = DefinitionTable::build(tree);
    let (images, embedded) = discover::discover(tree);

    // Markdown-syntax pass. Resolution is synchronous and read-only against
    // the tree; ineligible and unresolvable entries drop out here.
    let units: Vec<_> = images
        .iter()
        .filter_map(|entry| {
            resolve::resolve_image(&entry.image, &definitions, tree, ctx)
                .map(|resolved| (entry.id, entry.in_link, resolved))
        })
        .collect();
    let results = join_all(units.iter().map(|(id, in_link, resolved)| async move {
        let value = markup::generate(resolved, *in_link, ctx, options).await?;
        Some((*id, value))
    }))
    .await;

    let mut mutated = Vec::new();
    for (id, value) in results.into_iter().flatten() {
        splice_node(tree, id, value);
        mutated.push(id);
    }

    // Raw-HTML pass, joined separately and appended after.
    let results = join_all(
        embedded
            .iter()
            .map(|entry| splice::splice_embedded(entry, ctx, options)),
    )
    .await;
    for (entry, value) in embedded.iter().zip(results) {
        if let Some(value) = value {
            splice_node(tree, entry.id, value);
            mutated.push(entry.id);
        }
    }

    mutated
}

/// Replace a node in place with raw markup.
fn splice_node(tree: &mut Tree, id: NodeId, value: String) {
    let node = tree.node_mut(id);
    node.kind = NodeKind::Html { value };
    node.children.clear();
}
