use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Crate error type
// ---------------------------------------------------------------------------

/// Everything that can go wrong while resolving, loading, or rendering.
/// All variants are fatal to the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum VizError {
    /// No resolvable input file, or a mapped results file whose upstream
    /// producer has not run yet.
    #[error("{0}")]
    NotFound(String),

    /// Supplied argument is neither an existing file nor a directory.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// Required columns absent and no positional fallback applies.
    #[error("{0}")]
    Schema(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Chart backend failure, flattened to a message since the backend
    /// error types are generic over the drawing surface.
    #[error("chart rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, VizError>;

impl VizError {
    /// Wrap a plotters drawing error.
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        VizError::Render(err.to_string())
    }
}
