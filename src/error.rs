//! Error types for the fluidmark library.
//!
//! The document transform itself never fails: broken image references are
//! skipped, not raised. Errors exist only at the collaborator boundary
//! (the image service) and in configuration parsing.

use std::io;
use thiserror::Error;

/// Result type alias for fluidmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the silent-skip path.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from an image service implementation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failure reported by the external image service.
    #[error("Image service error: {0}")]
    Service(String),
}
