//! Section segmenter
//!
//! Groups the block stream into raw sections. A block opens a new section
//! when it is a high-confidence heading (enclosure title, glossary, table of
//! contents, `SECTION N`, a family fixed title), the next top-level numbered
//! heading, a dotted heading or, for families that use them, a bold
//! heading-shaped line. Everything else continues the current section; the
//! first blocks before any heading form an untitled leading section.
//!
//! Concatenating the returned sections reproduces the input block texts in
//! order. Noise lines are kept here and removed by the post-processors.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::family::DocumentFamilyRules;
use super::models::{Block, Section, Sections};
use super::parsing::heading::{
    NoiseFilter, is_enclosure_continuation, is_enclosure_title, is_glossary_start,
    is_heading_shaped, is_toc, is_toc_start,
};
use super::parsing::numbering::{ListMarker, list_marker};

static SECTION_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:SECTION\s+\d{1,2}\b|Section\s+\d{1,2}\s*[:.-])").unwrap()
});

/// Boundary decision for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// Open a section; `root` is the number of a top-level numbered heading.
    Start { root: Option<u32> },
    Continue,
}

/// A `SECTION 4` / `Section 4:` heading.
pub fn is_section_heading(text: &str) -> bool {
    SECTION_HEADING.is_match(text)
}

/// High-confidence section start: explicit keyword headings and enclosure
/// markers. Numbered headings are never high-confidence on their own.
pub fn is_known_section_start(text: &str, rules: &DocumentFamilyRules) -> bool {
    is_enclosure_title(text)
        || is_glossary_start(text)
        || is_toc_start(text)
        || is_section_heading(text)
        || rules.is_fixed_title(text)
}

/// Current section being accumulated.
#[derive(Debug, Default)]
struct Accumulator {
    lines: Section,
    root: Option<u32>,
    opened_by_bold: bool,
}

impl Accumulator {
    fn is_toc(&self) -> bool {
        self.lines.first().is_some_and(|first| is_toc_start(first))
    }

    /// The section holds only an enclosure title so far.
    fn is_bare_enclosure_title(&self) -> bool {
        self.lines.len() == 1 && is_enclosure_title(&self.lines[0])
    }
}

/// Split a block stream into raw sections.
pub fn segment(blocks: &[Block], rules: &DocumentFamilyRules, noise: &NoiseFilter) -> Sections {
    let mut sections = Sections::new();
    let mut current = Accumulator::default();
    let mut enclosure_titles: Vec<String> = Vec::new();

    for block in blocks {
        let boundary = if current.lines.is_empty() {
            // Any leading number roots the first section
            Boundary::Start {
                root: rules
                    .numbered_heading_number(&block.text)
                    .filter(|_| !block.is_first_line_indented),
            }
        } else {
            classify(block, &current, &mut enclosure_titles, rules, noise)
        };

        if let Boundary::Start { root } = boundary {
            if !current.lines.is_empty() {
                sections.push(std::mem::take(&mut current.lines));
            }
            current.root = root;
            current.opened_by_bold = block.is_bold;
            if is_enclosure_title(&block.text) && !enclosure_titles.contains(&block.text) {
                enclosure_titles.push(block.text.clone());
            }
        }

        current.lines.push(block.text.clone());
    }

    if !current.lines.is_empty() {
        sections.push(current.lines);
    }

    debug!(blocks = blocks.len(), sections = sections.len(), "segmented blocks");
    sections
}

fn numbered_root(block: &Block, rules: &DocumentFamilyRules, root: Option<u32>) -> Option<u32> {
    let number = rules.numbered_heading_number(&block.text)?;
    let expected = root.map_or(1, |root| root + 1);
    (number == expected && !block.is_first_line_indented).then_some(number)
}

fn classify(
    block: &Block,
    current: &Accumulator,
    enclosure_titles: &mut Vec<String>,
    rules: &DocumentFamilyRules,
    noise: &NoiseFilter,
) -> Boundary {
    let text = block.text.as_str();

    if noise.should_skip(text) {
        return Boundary::Continue;
    }

    // Leader-dot lines belong to whatever table of contents they sit in
    if (current.is_toc() && is_toc(text)) || (is_toc(text) && !is_toc_start(text)) {
        return Boundary::Continue;
    }

    if is_enclosure_title(text) {
        if is_enclosure_continuation(text, enclosure_titles.as_slice()) {
            return Boundary::Continue;
        }
        return Boundary::Start { root: None };
    }

    // Second title line under an enclosure marker ("ENCLOSURE 2" / "RESPONSIBILITIES")
    if current.is_bare_enclosure_title() && (rules.is_fixed_title(text) || is_heading_shaped(text)) {
        return Boundary::Continue;
    }

    if is_glossary_start(text) || is_toc_start(text) || is_section_heading(text) || rules.is_fixed_title(text) {
        if is_glossary_start(text) {
            enclosure_titles.clear();
        }
        return Boundary::Start { root: None };
    }

    if rules.numbered_heading_number(text).is_some() {
        return match numbered_root(block, rules, current.root) {
            Some(root) => Boundary::Start { root: Some(root) },
            // Numbering restarts and skips read as list items of the current section
            None => Boundary::Continue,
        };
    }

    if rules.is_dotted_heading(text) && !block.is_first_line_indented {
        return Boundary::Start { root: None };
    }

    if rules.bold_headings() && block.is_bold && is_heading_shaped(text) {
        let is_sub_item = matches!(
            list_marker(text),
            Some(ListMarker::Alpha { .. } | ListMarker::Parenthesized(_))
        );
        // Consecutive bold lines form one multi-line title
        let continues_title = current.opened_by_bold && current.lines.len() == 1;
        if !is_sub_item && !continues_title {
            return Boundary::Start { root: None };
        }
    }

    Boundary::Continue
}
