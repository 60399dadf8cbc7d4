//! Text extraction and style introspection
//!
//! This module handles extraction of text and style information
//! from docx-rs paragraph and run elements.

use docx_rs::SpecialIndentType;

/// Paragraph text with struck-through runs removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphText {
    pub text: String,
    pub strikethrough_removed: bool,
}

/// Extract text from a run using docx-rs features
pub(crate) fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                // Break types are private, so we'll just add a line break
                text.push('\n');
            }
            _ => {}
        }
    }

    text
}

pub(crate) fn is_struck(run: &docx_rs::Run) -> bool {
    let props = &run.run_property;
    props.strike.is_some() || props.dstrike.is_some()
}

/// Every run of a paragraph in reading order, including runs nested in
/// tracked insertions and hyperlinks. Deleted runs are skipped.
pub(crate) fn paragraph_runs(para: &docx_rs::Paragraph) -> Vec<&docx_rs::Run> {
    let mut runs = Vec::new();
    collect_runs(&para.children, &mut runs);
    runs
}

fn collect_runs<'a>(children: &'a [docx_rs::ParagraphChild], runs: &mut Vec<&'a docx_rs::Run>) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => runs.push(run),
            docx_rs::ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        runs.push(run);
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => collect_runs(&link.children, runs),
            // Skip deletions (track changes)
            _ => {}
        }
    }
}

/// Paragraph text with strikethrough runs dropped.
pub fn remove_strikethrough_text(para: &docx_rs::Paragraph) -> ParagraphText {
    let mut result = ParagraphText::default();

    for run in paragraph_runs(para) {
        let text = extract_run_text(run);
        if is_struck(run) {
            if !text.trim().is_empty() {
                result.strikethrough_removed = true;
            }
            continue;
        }
        result.text.push_str(&text);
    }

    result
}

/// True when every visible, non-blank run of the paragraph is bold.
pub fn is_bold(para: &docx_rs::Paragraph) -> bool {
    let mut saw_text = false;

    for run in paragraph_runs(para) {
        if is_struck(run) || extract_run_text(run).trim().is_empty() {
            continue;
        }
        saw_text = true;
        if run.run_property.bold.is_none() {
            return false;
        }
    }

    saw_text
}

/// Offset of the first line from the page margin in twips, if the paragraph
/// declares any indentation.
pub fn first_line_indent_width(para: &docx_rs::Paragraph) -> Option<i32> {
    let indent = para.property.indent.as_ref()?;
    let start = indent.start.unwrap_or(0);
    let special = match indent.special_indent {
        Some(SpecialIndentType::FirstLine(width)) => width,
        Some(SpecialIndentType::Hanging(width)) => -width,
        None => 0,
    };
    Some(start + special)
}

/// Judge a first-line offset against the document's most common indentation.
pub fn is_first_line_indented(width: Option<i32>, space_mode: i32) -> bool {
    width.is_some_and(|width| width > space_mode)
}
