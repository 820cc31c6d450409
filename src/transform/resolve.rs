//! Reference resolution.
//!
//! Turns a discovered image into a resolved local file plus the alt/title
//! material the markup phase needs. Every failure on this path is a silent
//! skip: one broken image reference must never fail the document.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::discover::DiscoveredImage;
use super::TransformContext;
use crate::model::{DefinitionTable, FileNode, NodeKind, Tree};

/// Parsed pieces of an image URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// URI with any query string removed
    pub url: String,

    /// Raw query string, without the leading `?`
    pub query: Option<String>,

    /// Substring after the final `.` of the path part
    pub ext: String,
}

impl ImageInfo {
    /// Split a URI into path, query string, and file extension.
    pub fn parse(uri: &str) -> Self {
        let (url, query) = match uri.split_once('?') {
            Some((url, query)) => (url.to_string(), Some(query.to_string())),
            None => (uri.to_string(), None),
        };
        let base = url.rsplit('/').next().unwrap_or("");
        let ext = match base.rfind('.') {
            // A leading dot marks a hidden file, not an extension.
            Some(i) if i > 0 => base[i + 1..].to_string(),
            _ => String::new(),
        };
        Self { url, query, ext }
    }
}

/// Whether a URL is relative to the document.
///
/// Scheme-prefixed (`https:`, `data:`, ...) and protocol-relative (`//`)
/// URLs point at hosted assets this transform cannot process.
pub fn is_relative_url(url: &str) -> bool {
    if url.starts_with("//") {
        return false;
    }
    let scheme = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").unwrap();
    !scheme.is_match(url)
}

/// Whether a parsed URI may be transformed at all.
///
/// Gifs cannot be resized; svgs are already responsive.
pub fn is_eligible(info: &ImageInfo) -> bool {
    is_relative_url(&info.url) && info.ext != "gif" && info.ext != "svg"
}

/// A fully resolved image: the local file plus the markup material.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    /// Document-relative URL, query stripped
    pub url: String,

    /// Raw query string from the source URI
    pub query: Option<String>,

    /// Alt text on the resolved node
    pub alt: Option<String>,

    /// Title on the resolved node (the definition's, for references)
    pub title: Option<String>,

    /// Alt override from a referencing node or embedded tag
    pub alt_override: Option<String>,

    /// The matched local file
    pub file: FileNode,
}

/// Resolve a markdown image entry. `None` is a silent skip.
pub fn resolve_image(
    image: &DiscoveredImage,
    definitions: &DefinitionTable,
    tree: &Tree,
    ctx: &TransformContext<'_>,
) -> Option<ResolvedImage> {
    let (url, alt, title, alt_override) = match image {
        DiscoveredImage::Direct { url, alt, title } => {
            (url.clone(), alt.clone(), title.clone(), None)
        }
        DiscoveredImage::Reference { identifier, alt } => {
            // A dangling reference is the author's business, not ours.
            let definition = definitions.get(identifier)?;
            match &tree.node(definition).kind {
                NodeKind::Definition { url, title, .. } => {
                    (url.clone(), None, title.clone(), alt.clone())
                }
                _ => return None,
            }
        }
    };

    let info = ImageInfo::parse(&url);
    if !is_eligible(&info) {
        return None;
    }
    resolve_source(info, alt, title, alt_override, ctx)
}

/// Resolve an already-eligible source URI to its local file.
///
/// Fails silently when the document has no backing file or no candidate
/// matches the resolved path exactly.
pub fn resolve_source(
    info: ImageInfo,
    alt: Option<String>,
    title: Option<String>,
    alt_override: Option<String>,
    ctx: &TransformContext<'_>,
) -> Option<ResolvedImage> {
    let document = ctx.document?;
    let path = join_relative(&document.dir, &info.url);
    let file = ctx.files.iter().find(|f| f.absolute_path == path)?.clone();
    Some(ResolvedImage {
        url: info.url,
        query: info.query,
        alt,
        title,
        alt_override,
        file,
    })
}

/// Join a document-relative URL onto a directory, segment by segment.
///
/// Empty and `.` segments collapse, `..` pops, and a leading `/` does not
/// reset to the filesystem root.
pub(crate) fn join_relative(dir: &Path, url: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    for segment in url.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                path.pop();
            }
            segment => path.push(segment),
        }
    }
    path
}
