use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for depsets operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepsetsError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project descriptor (e.g. Project.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Project.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid or malformed dependency-set catalog.
    #[error("Catalog error: {message}")]
    #[diagnostic(help(
        "Each entry must be either a dependency array or a table with a `dependencies` key"
    ))]
    Catalog { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
