//! Records exchanged with the host framework's collaborators.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Responsive image result produced by the external image service.
///
/// Consumed once per image; the service owns all resizing and caching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidImage {
    /// URL of the unresized original asset
    pub original_img: String,

    /// Fallback source for the `src` attribute
    pub src: String,

    /// Responsive `srcset` value
    pub src_set: String,

    /// Width the image is presented at, in pixels
    pub presentation_width: u32,

    /// Width divided by height
    pub aspect_ratio: f64,
}

/// A file known to the host, matched by exact absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Absolute path on the local file system
    pub absolute_path: PathBuf,
}

impl FileNode {
    /// Create a file record.
    pub fn new(absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
        }
    }
}

/// The file backing the document being transformed.
///
/// Relative image URLs resolve against `dir`. A document with no resolvable
/// backing file simply produces no transforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Directory containing the source document
    pub dir: PathBuf,
}

impl DocumentFile {
    /// Create a document-file record.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}
