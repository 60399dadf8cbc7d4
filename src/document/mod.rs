//! Document reading, segmentation and section labeling
//!
//! This module turns a Microsoft Word (.docx) or plain-text document into an
//! ordered list of cleaned sections and exposes labeled accessors over them.

pub(crate) mod cleanup;
pub mod family;
pub(crate) mod io;
pub mod loader;
pub mod models;
pub mod parsing;
pub mod query;
pub mod reader;
pub mod segmenter;

pub use cleanup::{
    Pass, PassContext, combine_alpha_list_items, combine_by_section_nums, combine_enclosures,
    combine_enclosures_list, combine_glossary, combine_glossary_then_references,
    combine_section_nums, combine_toc, post_process, remove_pagebreaks_and_noise,
    remove_repeated_section_titles,
};
pub use family::{
    DocumentFamilyRules, NUMBERED_PURPOSE_START_PATTERN, NUMBERED_RESPONSIBILITIES_START_PATTERN,
};
pub use loader::{
    ParseOptions, load_document, parse_blocks, parse_blocks_with, parse_docx_bytes, parse_text,
};
pub use models::*;
pub use query::{ParsedDocument, classify_section, find_section, heading_lines};
pub use reader::{ReadOptions, read_blocks, read_docx_blocks, read_text_blocks};
pub use segmenter::{is_known_section_start, is_section_heading, segment};
