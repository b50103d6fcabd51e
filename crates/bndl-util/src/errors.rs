use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for bndl operations.
#[derive(Debug, Error, Diagnostic)]
pub enum BndlError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed workspace description (e.g. Bndl.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Bndl.toml for syntax errors"))]
    Manifest { message: String },

    /// Bundle resolution failed.
    #[error("Resolution failed: {message}")]
    Resolution { message: String },

    /// A repository could not answer a query.
    #[error("Repository error: {message}")]
    Repository { message: String },

    /// A resolved bundle could not be made available locally.
    #[error("Synchronization failed: {message}")]
    Sync { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type BndlResult<T> = miette::Result<T>;
