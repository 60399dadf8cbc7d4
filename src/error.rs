//! Error types surfaced by the library
//!
//! Reading a source document is the only fallible step of the pipeline.
//! Matchers degrade to "no match" instead of failing, except for the two
//! argument errors in [`PatternError`].

use std::path::PathBuf;
use thiserror::Error;

/// The source document could not be opened or has an unexpected structure.
#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("failed to parse .docx body: {0}")]
    Docx(#[from] docx_rs::ReaderError),

    #[error("failed to open .docx container: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Invalid arguments handed to a matcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unsupported return type `{0}` (expected one of: str, int, bool)")]
    UnsupportedReturnType(String),

    #[error("`{0}` has no successor letter")]
    InvalidLetter(String),
}
