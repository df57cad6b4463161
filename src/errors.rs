use thiserror::Error;

/// Errors that can occur during curation operations.
#[derive(Error, Debug)]
pub enum CuratorError {
    /// Manifest or frontmatter parsing failed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Manifest validation found problems.
    #[error("validation failed")]
    Validation { errors: Vec<String> },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// README rendering error.
    #[error("render error: {message}")]
    Render { message: String },
}

/// Convenience alias for `Result<T, CuratorError>`.
pub type Result<T> = std::result::Result<T, CuratorError>;
