//! section-parse: section segmentation for policy and issuance documents
//!
//! This library reads Microsoft Word (.docx) or plain-text issuances, splits
//! them into structural sections and labels those sections (purpose,
//! responsibilities, references, glossary and so on) using heading
//! conventions specific to each issuing authority.

pub mod config;
pub mod document;
pub mod error;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Full document record as JSON
    #[default]
    Json,
    /// Sections as plain text separated by rules
    Text,
}

// Re-export commonly used types
pub use config::ParserConfig;
pub use document::{
    Block, BlockStream, DocumentFamily, DocumentFamilyRules, DocumentIdentity, DocumentRecord,
    ParseOptions, ParsedDocument, ReadOptions, SectionLabel, Sections, load_document,
};
pub use error::{DocumentReadError, PatternError};
