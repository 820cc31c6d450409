//! External collaborator interfaces.
//!
//! The transform delegates all actual image work (resizing, format
//! conversion, trace-SVG) to an [`ImageService`] supplied by the host
//! framework, and optionally compiles caption strings through a
//! [`CaptionCompiler`]. Both are consumed behind references for the duration
//! of a single document pass.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{FileNode, FluidImage};
use crate::transform::TransformOptions;

/// External image-processing service.
///
/// Called once per resolved image. `Ok(None)` means the service could not
/// produce a result for this file; the transform treats that, and any
/// returned error, as a skip of the single image rather than a document
/// failure. The service owns all caching of resized assets.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Produce a responsive image result for a local file.
    async fn fluid(
        &self,
        file: &FileNode,
        options: &TransformOptions,
    ) -> Result<Option<FluidImage>>;
}

/// Compiles a caption string to an HTML fragment.
///
/// Used only when
/// [`markdown_captions`](crate::transform::TransformOptions::markdown_captions)
/// is enabled; without a compiler the caption falls back to escaped plain
/// text.
pub trait CaptionCompiler: Send + Sync {
    /// Compile markdown-flavored source to HTML.
    fn compile(&self, source: &str) -> String;
}

/// [`CaptionCompiler`] backed by a CommonMark parser.
///
/// # Example
///
/// ```
/// use fluidmark::{CaptionCompiler, CommonMarkCompiler};
///
/// let compiler = CommonMarkCompiler::new();
/// assert_eq!(compiler.compile("a *fine* cat"), "<p>a <em>fine</em> cat</p>");
/// ```
#[cfg(feature = "commonmark")]
#[derive(Debug, Clone, Default)]
pub struct CommonMarkCompiler;

#[cfg(feature = "commonmark")]
impl CommonMarkCompiler {
    /// Create a new compiler.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "commonmark")]
impl CaptionCompiler for CommonMarkCompiler {
    fn compile(&self, source: &str) -> String {
        let parser = pulldown_cmark::Parser::new(source);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        html.trim_end().to_string()
    }
}
