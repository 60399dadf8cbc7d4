//! Block reader
//!
//! Walks a source document's body in document order and yields typed
//! [`Block`]s. Tables are flattened into cell paragraphs (see
//! [`super::parsing::table`]). The most frequent first-line indentation is
//! reported as `space_mode` and is the baseline each block's
//! `is_first_line_indented` flag is judged against.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

use super::io::{is_docx_path, read_docx_bytes, read_text_file};
use super::models::*;
use super::parsing::formatting::{
    first_line_indent_width, is_bold, is_first_line_indented, remove_strikethrough_text,
};
use super::parsing::table::flatten_table;
use crate::error::DocumentReadError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Read column-major tables in their logical order.
    pub should_fix_order: bool,
    /// Prefix Word auto-numbered paragraphs with a reconstructed marker
    /// (`1.`, `a.`, `(1)`), which Word keeps outside the run text.
    pub restore_list_numbers: bool,
}

/// Read a .docx or plain-text file into blocks.
pub fn read_blocks(file_path: &Path, options: ReadOptions) -> Result<BlockStream, DocumentReadError> {
    if is_docx_path(file_path) {
        let data = read_docx_bytes(file_path)?;
        read_docx_blocks(&data, options)
    } else {
        Ok(read_text_blocks(&read_text_file(file_path)?))
    }
}

/// Read blocks from the bytes of a .docx package.
pub fn read_docx_blocks(data: &[u8], options: ReadOptions) -> Result<BlockStream, DocumentReadError> {
    let docx = docx_rs::read_docx(data)?;
    Ok(blocks_from_document(&docx.document, options))
}

/// Plain text (e.g. extracted from a PDF): one block per non-blank line.
pub fn read_text_blocks(text: &str) -> BlockStream {
    let blocks = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Block::plain)
        .collect();

    BlockStream {
        blocks,
        space_mode: 0,
    }
}

pub(crate) fn blocks_from_document(document: &docx_rs::Document, options: ReadOptions) -> BlockStream {
    let mut paragraphs: Vec<(&docx_rs::Paragraph, BlockSource)> = Vec::new();

    for child in &document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let para: &docx_rs::Paragraph = para;
                paragraphs.push((para, BlockSource::Paragraph));
            }
            docx_rs::DocumentChild::Table(table) => {
                let cells = flatten_table(table, options.should_fix_order);
                if cells.is_empty() {
                    warn!("skipping table without readable cells");
                }
                paragraphs.extend(cells.into_iter().map(|para| (para, BlockSource::TableCell)));
            }
            _ => {}
        }
    }

    let space_mode = space_mode(paragraphs.iter().map(|(para, _)| first_line_indent_width(para)));
    let mut numbering = AutoNumbering::default();
    let mut blocks = Vec::with_capacity(paragraphs.len());

    for (para, source) in paragraphs {
        let extracted = remove_strikethrough_text(para);
        let text = extracted.text.trim();
        if text.is_empty() {
            continue;
        }

        let text = match para.property.numbering_property.as_ref() {
            Some(num_pr) if options.restore_list_numbers => {
                let level = num_pr.level.as_ref().map(|l| l.val).unwrap_or(0);
                let num_id = num_pr.id.as_ref().map(|id| id.id).unwrap_or(0);
                format!("{} {text}", numbering.next_marker(num_id, level))
            }
            _ => text.to_string(),
        };

        blocks.push(Block {
            text,
            is_bold: is_bold(para),
            is_first_line_indented: is_first_line_indented(first_line_indent_width(para), space_mode),
            has_strikethrough_removed: extracted.strikethrough_removed,
            source,
        });
    }

    debug!(blocks = blocks.len(), space_mode, "read document body");
    BlockStream { blocks, space_mode }
}

/// Most frequent indentation width; ties go to the smaller width.
pub(crate) fn space_mode(widths: impl Iterator<Item = Option<i32>>) -> i32 {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for width in widths.flatten() {
        *counts.entry(width).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(i32, usize)>, (width, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((width, count)),
        })
        .map(|(width, _)| width)
        .unwrap_or(0)
}

/// Sequential counters for Word auto-numbering, keyed by (numId, level).
#[derive(Debug, Default)]
struct AutoNumbering {
    counters: HashMap<(usize, usize), u32>,
}

impl AutoNumbering {
    fn next_marker(&mut self, num_id: usize, level: usize) -> String {
        let counter = {
            let counter = self.counters.entry((num_id, level)).or_insert(0);
            *counter += 1;
            *counter
        };

        // Reset deeper levels when a higher level advances
        self.counters
            .retain(|(id, lvl), _| *id != num_id || *lvl <= level);

        let letter = |n: u32| -> String {
            if (1..=26).contains(&n) {
                ((b'a' + (n - 1) as u8) as char).to_string()
            } else {
                n.to_string()
            }
        };

        match level % 4 {
            0 => format!("{counter}."),
            1 => format!("{}.", letter(counter)),
            2 => format!("({counter})"),
            _ => format!("({})", letter(counter)),
        }
    }
}
