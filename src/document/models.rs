//! Core data structures for document representation
//!
//! This module defines the public types that flow through the pipeline:
//! blocks read from a source document, the section lists produced by the
//! segmenter, section labels and the final document record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One section: an ordered list of paragraph-like strings.
pub type Section = Vec<String>;

/// Ordered sections of a document.
pub type Sections = Vec<Section>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockSource {
    #[default]
    Paragraph,
    TableCell,
}

/// One unit of document content in reading order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub is_bold: bool,
    pub is_first_line_indented: bool,
    /// Struck-through runs were dropped before `text` was assembled.
    pub has_strikethrough_removed: bool,
    pub source: BlockSource,
}

impl Block {
    /// A plain paragraph block with no style information.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bold: false,
            is_first_line_indented: false,
            has_strikethrough_removed: false,
            source: BlockSource::Paragraph,
        }
    }

    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    pub fn indented(mut self) -> Self {
        self.is_first_line_indented = true;
        self
    }
}

/// Blocks of one document plus the indentation baseline they were judged against.
#[derive(Debug, Clone, Default)]
pub struct BlockStream {
    pub blocks: Vec<Block>,
    /// Most frequent first-line indentation width, in twips.
    pub space_mode: i32,
}

impl BlockStream {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.text.as_str())
    }
}

/// Accessor keys for labeled sections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Subject,
    TableOfContents,
    Purpose,
    Applicability,
    Authorities,
    Policy,
    Responsibilities,
    Procedures,
    Organizations,
    SummaryOfChange,
    References,
    Definitions,
    Glossary,
    Enclosures,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 14] = [
        SectionLabel::Subject,
        SectionLabel::TableOfContents,
        SectionLabel::Purpose,
        SectionLabel::Applicability,
        SectionLabel::Authorities,
        SectionLabel::Policy,
        SectionLabel::Responsibilities,
        SectionLabel::Procedures,
        SectionLabel::Organizations,
        SectionLabel::SummaryOfChange,
        SectionLabel::References,
        SectionLabel::Definitions,
        SectionLabel::Glossary,
        SectionLabel::Enclosures,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionLabel::Subject => "subject",
            SectionLabel::TableOfContents => "table_of_contents",
            SectionLabel::Purpose => "purpose",
            SectionLabel::Applicability => "applicability",
            SectionLabel::Authorities => "authorities",
            SectionLabel::Policy => "policy",
            SectionLabel::Responsibilities => "responsibilities",
            SectionLabel::Procedures => "procedures",
            SectionLabel::Organizations => "organizations",
            SectionLabel::SummaryOfChange => "summary_of_change",
            SectionLabel::References => "references",
            SectionLabel::Definitions => "definitions",
            SectionLabel::Glossary => "glossary",
            SectionLabel::Enclosures => "enclosures",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionLabel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        SectionLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
            .ok_or_else(|| format!("unknown section label `{value}`"))
    }
}

/// Issuing-authority document family; selects the pattern tables used.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFamily {
    /// DoD issuances (DoDD, DoDI, DoDM, DTM)
    Dod,
    /// Chairman of the Joint Chiefs of Staff instructions, manuals and notices
    Cjcs,
    /// Navy and Marine Corps directives (OPNAVINST, SECNAVINST, MCO)
    Navy,
    #[default]
    Generic,
}

impl DocumentFamily {
    /// Family implied by a document type prefix, if any.
    pub fn from_doc_type(doc_type: &str) -> Option<Self> {
        let upper = doc_type.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return None;
        }

        if upper.starts_with("DOD") || upper == "DTM" {
            Some(DocumentFamily::Dod)
        } else if upper.starts_with("CJCS") {
            Some(DocumentFamily::Cjcs)
        } else if [
            "OPNAV", "SECNAV", "MCO", "NAVMC", "BUPERS", "NAVSEA", "NAVAIR", "MARADMIN",
        ]
        .iter()
        .any(|prefix| upper.starts_with(prefix))
        {
            Some(DocumentFamily::Navy)
        } else {
            None
        }
    }
}

/// Caller-supplied identity of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentIdentity {
    pub doc_type: String,
    pub doc_num: String,
    pub filename: String,
}

impl DocumentIdentity {
    pub fn new(
        doc_type: impl Into<String>,
        doc_num: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            doc_type: doc_type.into(),
            doc_num: doc_num.into(),
            filename: filename.into(),
        }
    }

    /// Derive type and number from a file stem such as `DoDI 5400.11 CH 1.docx`.
    pub fn from_filename(path: &Path) -> Self {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .replace('_', " ");

        let mut words = stem.split_whitespace();
        let doc_type = words.next().unwrap_or_default().to_string();
        let doc_num = words.next().unwrap_or_default().to_string();

        Self {
            doc_type,
            doc_num,
            filename,
        }
    }

    /// The string running headers repeat, e.g. `DoDI 5400.11`.
    pub fn doc_identifier(&self) -> String {
        format!("{} {}", self.doc_type.trim(), self.doc_num.trim())
            .trim()
            .to_string()
    }
}

/// Serializable view of a parsed document with every accessor evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    pub doc_type: String,
    pub doc_num: String,
    pub filename: String,
    pub family: DocumentFamily,
    pub all_sections: Sections,
    pub subject: Vec<String>,
    pub table_of_contents: Vec<String>,
    pub purpose: Vec<String>,
    pub applicability: Vec<String>,
    pub authorities: Vec<String>,
    pub policy: Vec<String>,
    pub responsibilities: Vec<String>,
    pub procedures: Vec<String>,
    pub organizations: Vec<String>,
    pub summary_of_change: Vec<String>,
    pub references: Vec<String>,
    pub definitions: Vec<String>,
    pub glossary: Vec<String>,
    pub enclosures: Vec<String>,
}
