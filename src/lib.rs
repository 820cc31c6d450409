//! # fluidmark
//!
//! Responsive image transform for parsed Markdown document trees.
//!
//! `fluidmark` walks a parsed document tree, finds image references —
//! markdown syntax, reference-style, and `<img>` tags inside raw embedded
//! HTML — resolves each one to a local file, asks a host-provided image
//! service for a responsive ("fluid") result, and splices
//! aspect-ratio-preserving HTML fragments back into the tree. The transform
//! is best-effort by design: a broken reference skips that image, never the
//! document.
//!
//! ## Quick start
//!
//! ```no_run
//! use fluidmark::{
//!     transform, DocumentFile, FileNode, FluidImage, ImageService, NodeKind, Tree,
//!     TransformContext, TransformOptions,
//! };
//!
//! struct Resizer;
//!
//! #[async_trait::async_trait]
//! impl ImageService for Resizer {
//!     async fn fluid(
//!         &self,
//!         _file: &FileNode,
//!         _options: &TransformOptions,
//!     ) -> fluidmark::Result<Option<FluidImage>> {
//!         // Hand the file to your resize pipeline here.
//!         Ok(None)
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! tree.push(
//!     tree.root(),
//!     NodeKind::Image {
//!         url: "./images/cat.jpg".to_string(),
//!         alt: Some("a cat".to_string()),
//!         title: None,
//!     },
//! );
//!
//! let files = vec![FileNode::new("/content/blog/images/cat.jpg")];
//! let document = DocumentFile::new("/content/blog");
//! let service = Resizer;
//! let ctx = TransformContext {
//!     files: &files,
//!     document: Some(&document),
//!     service: &service,
//!     compiler: None,
//! };
//!
//! let options = TransformOptions::default().with_max_width(820);
//! let mutated = futures::executor::block_on(transform(&mut tree, &ctx, &options));
//! println!("rewrote {} image(s)", mutated.len());
//! ```
//!
//! ## What gets skipped
//!
//! - Absolute and protocol-relative URLs (hosted elsewhere)
//! - `gif` (cannot be resized) and `svg` (already responsive)
//! - Reference-style images without a matching definition
//! - Documents without a resolvable backing file
//! - Files absent from the candidate set
//!
//! All of these are silent: the document-level operation always succeeds,
//! possibly with zero mutations.

pub mod error;
pub mod model;
pub mod service;
pub mod theme;
pub mod transform;

pub use error::{Error, Result};
pub use model::{
    DefinitionTable, DocumentFile, FileNode, FluidImage, Node, NodeId, NodeKind, Tree,
};
#[cfg(feature = "commonmark")]
pub use service::CommonMarkCompiler;
pub use service::{CaptionCompiler, ImageService};
pub use theme::Theme;
pub use transform::{
    transform, CaptionSource, Loading, ShowCaptions, TransformContext, TransformOptions,
    WrapperStyle, FIGCAPTION_CLASS, FIGURE_CLASS, IMAGE_BACKGROUND_CLASS, IMAGE_CLASS,
    IMAGE_LINK_CLASS, IMAGE_WRAPPER_CLASS,
};
