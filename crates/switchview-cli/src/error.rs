//! Error types for the switchview CLI.

use std::path::PathBuf;
use switchview_widgets::AttributeError;
use thiserror::Error;

/// Errors that can occur while running the host.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// IO error writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Style file could not be read.
    #[error("Failed to read style '{}': {source}", .path.display())]
    ReadStyle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Style file could not be applied.
    #[error("Invalid style: {0}")]
    Attribute(#[from] AttributeError),

    /// Report serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Argument outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
