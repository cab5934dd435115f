//! Errors raised while resolving and rendering views.

use std::path::PathBuf;

/// Error type for view resolution, resource probing and rendering.
///
/// Failures from the delegate resolver or the resource space are passed
/// through unchanged; the theme layer adds no variants of its own.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The template engine rejected or failed to render a template.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Reading a resource from disk failed.
    #[error("failed to read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A resource was read that the resource space does not contain.
    #[error("resource not found: \"{path}\"")]
    NotFound { path: String },

    /// Settings could not be parsed.
    #[error("invalid template settings: {0}")]
    Settings(#[from] serde_yaml::Error),

    /// A location string cannot be mapped onto a resource space.
    #[error("invalid location \"{location}\": {reason}")]
    InvalidLocation { location: String, reason: String },
}

impl ViewError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViewError::Io {
            path: path.into(),
            source,
        }
    }
}
