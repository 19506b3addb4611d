use miette::Diagnostic;
use thiserror::Error;

/// Main error type for docmdx operations
#[derive(Error, Diagnostic, Debug)]
pub enum DocError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(docmdx::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(docmdx::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The document does not follow the agreed template layout.
    #[error("Template structure error: {message}")]
    #[diagnostic(code(docmdx::structure))]
    Structure {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(docmdx::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(docmdx::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, DocError>;
