//! Error types for defaults persistence.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value could not be captured or written back into its type.
    #[error(transparent)]
    Mirror(#[from] fieldkit_mirror::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The defaults file parsed, but is not a single JSON object.
    #[error("defaults file {} does not hold a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
