//! Document loading and orchestration
//!
//! This module contains [`load_document`], which reads a source file and
//! runs the whole pipeline over it: Block Reader, Segmenter, then the
//! family's post-processing passes. The in-memory entry points
//! ([`parse_blocks`], [`parse_text`], [`parse_docx_bytes`]) run the same
//! pipeline without touching the filesystem.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::cleanup::{PassContext, post_process};
use super::family::DocumentFamilyRules;
use super::models::*;
use super::parsing::heading::NoiseFilter;
use super::query::ParsedDocument;
use super::reader::{ReadOptions, read_blocks, read_docx_blocks, read_text_blocks};
use super::segmenter::segment;
use crate::error::DocumentReadError;

/// Caller-side knobs for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Family to use regardless of the document type.
    pub family: Option<DocumentFamily>,
    /// Family to use when the document type does not imply one.
    pub default_family: Option<DocumentFamily>,
    pub read: ReadOptions,
    /// Extra running-header/footer regexes.
    pub extra_noise_patterns: Vec<String>,
}

impl ParseOptions {
    /// Explicit family, then the doc type's family, then the default, then generic.
    pub fn resolve_family(&self, identity: &DocumentIdentity) -> DocumentFamily {
        if let Some(family) = self.family {
            return family;
        }
        if let Some(family) = DocumentFamily::from_doc_type(&identity.doc_type) {
            return family;
        }
        if let Some(family) = self.default_family {
            return family;
        }

        if !identity.doc_type.trim().is_empty() {
            warn!(doc_type = %identity.doc_type, "unrecognized document type, using generic rules");
        }
        DocumentFamily::Generic
    }
}

/// Read and parse a .docx or plain-text file.
pub fn load_document(
    file_path: &Path,
    identity: DocumentIdentity,
    options: &ParseOptions,
) -> Result<ParsedDocument, DocumentReadError> {
    let stream = read_blocks(file_path, options.read)?;
    let document = parse_blocks(&stream.blocks, identity, options);

    info!(
        path = %file_path.display(),
        family = ?document.family,
        blocks = stream.blocks.len(),
        sections = document.all_sections.len(),
        "parsed document"
    );
    Ok(document)
}

/// Parse the bytes of a .docx package.
pub fn parse_docx_bytes(
    data: &[u8],
    identity: DocumentIdentity,
    options: &ParseOptions,
) -> Result<ParsedDocument, DocumentReadError> {
    let stream = read_docx_blocks(data, options.read)?;
    Ok(parse_blocks(&stream.blocks, identity, options))
}

/// Parse plain text, one block per non-blank line.
pub fn parse_text(text: &str, identity: DocumentIdentity, options: &ParseOptions) -> ParsedDocument {
    parse_blocks(&read_text_blocks(text).blocks, identity, options)
}

pub fn parse_blocks(blocks: &[Block], identity: DocumentIdentity, options: &ParseOptions) -> ParsedDocument {
    let family = options.resolve_family(&identity);
    run_pipeline(blocks, identity, family.rules(), &options.extra_noise_patterns)
}

/// Run the pipeline with an explicit rules value. The returned document
/// answers its accessors with `rules`.
pub fn parse_blocks_with(
    blocks: &[Block],
    identity: DocumentIdentity,
    rules: Arc<DocumentFamilyRules>,
    extra_noise_patterns: &[String],
) -> ParsedDocument {
    let mut document = run_pipeline(blocks, identity, &rules, extra_noise_patterns);
    document.custom_rules = Some(rules);
    document
}

fn run_pipeline(
    blocks: &[Block],
    identity: DocumentIdentity,
    rules: &DocumentFamilyRules,
    extra_noise_patterns: &[String],
) -> ParsedDocument {
    let noise = NoiseFilter::new(&identity.doc_identifier()).with_extra_patterns(extra_noise_patterns);

    let raw = segment(blocks, rules, &noise);
    let raw_count = raw.len();
    let context = PassContext {
        noise: &noise,
        rules,
    };
    let all_sections = post_process(raw, rules.passes(), &context);

    debug!(
        family = ?rules.family,
        raw_sections = raw_count,
        sections = all_sections.len(),
        "post-processed sections"
    );

    ParsedDocument {
        doc_type: identity.doc_type,
        doc_num: identity.doc_num,
        filename: identity.filename,
        family: rules.family,
        all_sections,
        custom_rules: None,
    }
}
