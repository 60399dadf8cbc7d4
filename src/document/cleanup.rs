//! Post-processing passes
//!
//! Each pass is a total function over the raw section list. Passes never
//! reorder surviving lines; they only merge adjacent sections or drop
//! recognized noise. A family runs its passes in a fixed order, and
//! [`post_process`] repeats that pipeline until it reaches a fixed point.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::family::DocumentFamilyRules;
use super::models::{Section, Sections};
use super::parsing::heading::{
    NoiseFilter, is_enclosure_continuation, is_enclosure_title,
    is_glossary_continuation, is_glossary_start, is_heading_shaped, is_toc, is_toc_start,
    match_section_num, strip_filler,
};
use super::parsing::list::{is_alpha_list_item, is_list_child};
use super::parsing::numbering::{ListMarker, list_marker};
use super::segmenter::{is_known_section_start, is_section_heading};

static ENCLOSURES_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:ENCLOSURES?|Enclosures?)\s*:?\s*$").unwrap());

static ENCLOSURE_LIST_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(?:\d{1,2}\.|\(\d{1,2}\))\s+)?[A-Z][A-Za-z0-9 ,'/&()-]{0,80}$").unwrap()
});

static REFERENCES_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:E?\d{1,2}\.\s+)?REFERENCES\b").unwrap());

/// Upper bound on pipeline repetitions in [`post_process`].
const MAX_ROUNDS: usize = 16;

/// Shared inputs of the post-processing passes.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub noise: &'a NoiseFilter,
    pub rules: &'a DocumentFamilyRules,
}

/// One post-processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    RemovePagebreaksAndNoise,
    CombineToc,
    CombineAlphaListItems,
    CombineSectionNums,
    CombineBySectionNums,
    CombineEnclosures,
    CombineEnclosuresList,
    CombineGlossary,
    CombineGlossaryThenReferences,
    RemoveRepeatedSectionTitles,
}

impl Pass {
    pub const DEFAULT_PIPELINE: [Pass; 8] = [
        Pass::RemovePagebreaksAndNoise,
        Pass::CombineToc,
        Pass::CombineAlphaListItems,
        Pass::CombineSectionNums,
        Pass::CombineBySectionNums,
        Pass::CombineEnclosures,
        Pass::CombineGlossary,
        Pass::RemoveRepeatedSectionTitles,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pass::RemovePagebreaksAndNoise => "remove_pagebreaks_and_noise",
            Pass::CombineToc => "combine_toc",
            Pass::CombineAlphaListItems => "combine_alpha_list_items",
            Pass::CombineSectionNums => "combine_section_nums",
            Pass::CombineBySectionNums => "combine_by_section_nums",
            Pass::CombineEnclosures => "combine_enclosures",
            Pass::CombineEnclosuresList => "combine_enclosures_list",
            Pass::CombineGlossary => "combine_glossary",
            Pass::CombineGlossaryThenReferences => "combine_glossary_then_references",
            Pass::RemoveRepeatedSectionTitles => "remove_repeated_section_titles",
        }
    }

    pub fn apply(self, sections: Sections, context: &PassContext<'_>) -> Sections {
        match self {
            Pass::RemovePagebreaksAndNoise => remove_pagebreaks_and_noise(sections, context.noise),
            Pass::CombineToc => combine_toc(sections),
            Pass::CombineAlphaListItems => combine_alpha_list_items(sections),
            Pass::CombineSectionNums => combine_section_nums(sections, context.rules),
            Pass::CombineBySectionNums => combine_by_section_nums(sections, context.rules),
            Pass::CombineEnclosures => combine_enclosures(sections),
            Pass::CombineEnclosuresList => combine_enclosures_list(sections),
            Pass::CombineGlossary => combine_glossary(sections, context.rules),
            Pass::CombineGlossaryThenReferences => {
                combine_glossary_then_references(sections, context.rules)
            }
            Pass::RemoveRepeatedSectionTitles => {
                remove_repeated_section_titles(sections, context.rules)
            }
        }
    }
}

/// Run `passes` in order, repeating the whole pipeline until the output no
/// longer changes.
pub fn post_process(mut sections: Sections, passes: &[Pass], context: &PassContext<'_>) -> Sections {
    for round in 1..=MAX_ROUNDS {
        let mut next = sections.clone();
        for pass in passes {
            let before = next.len();
            next = pass.apply(next, context);
            debug!(pass = pass.name(), round, before, after = next.len(), "applied pass");
        }

        if next == sections {
            return sections;
        }
        sections = next;
    }

    warn!(rounds = MAX_ROUNDS, "post-processing did not settle");
    sections
}

fn first_line(section: &[String]) -> &str {
    section.first().map(String::as_str).unwrap_or("")
}

/// Merge `section` into the last output section, or start a new one.
fn push_or_merge(out: &mut Sections, section: Section, merge: bool) {
    match out.last_mut() {
        Some(last) if merge => last.extend(section),
        _ => out.push(section),
    }
}

/// Drop running headers/footers, lone page numbers and `(INTENTIONALLY
/// BLANK)` filler. Other text sharing a line with filler is kept. Blocks that
/// contained no noise are left untouched.
pub fn remove_pagebreaks_and_noise(sections: Sections, noise: &NoiseFilter) -> Sections {
    sections
        .into_iter()
        .map(|section| {
            section
                .into_iter()
                .filter_map(|block| clean_block(block, noise))
                .collect::<Section>()
        })
        .filter(|section| !section.is_empty())
        .collect()
}

fn clean_block(block: String, noise: &NoiseFilter) -> Option<String> {
    let mut removed = false;
    let mut kept = Vec::new();

    for line in block.split('\n') {
        let stripped = strip_filler(line);
        let stripped = stripped.trim();
        if stripped.len() != line.trim().len() {
            removed = true;
        }

        if stripped.is_empty() {
            continue;
        }
        if noise.should_skip(stripped) {
            removed = true;
            continue;
        }
        kept.push(stripped.to_string());
    }

    if kept.is_empty() {
        None
    } else if removed {
        Some(kept.join("\n"))
    } else {
        Some(block)
    }
}

/// Table-of-contents shape: starts with the contents title, or most of its
/// lines carry leader dots and page numbers.
fn is_toc_section(section: &[String]) -> bool {
    if is_toc_start(first_line(section)) {
        return true;
    }
    let toc_lines = section.iter().filter(|line| is_toc(line)).count();
    toc_lines * 2 > section.len()
}

/// Merge consecutive table-of-contents fragments.
pub fn combine_toc(sections: Sections) -> Sections {
    let mut out = Sections::new();
    let mut previous_is_toc = false;

    for section in sections {
        let is_toc = is_toc_section(&section);
        push_or_merge(&mut out, section, previous_is_toc && is_toc);
        previous_is_toc = is_toc;
    }

    out
}

/// Re-attach sections that open with the next alpha item (`b.` after `a.`)
/// or with an `a.` sublist under the previous section's numbered item.
pub fn combine_alpha_list_items(sections: Sections) -> Sections {
    let mut out = Sections::new();

    for section in sections {
        let first = first_line(&section);
        let merge = is_alpha_list_item(first)
            && out.last().is_some_and(|last| is_list_child(first, last));
        push_or_merge(&mut out, section, merge);
    }

    out
}

/// Fold the sections following a `SECTION N` heading into it while they
/// stay under root `N`.
pub fn combine_section_nums(sections: Sections, rules: &DocumentFamilyRules) -> Sections {
    let mut out = Sections::new();
    let mut root: Option<String> = None;

    for section in sections {
        let first = first_line(&section);

        if is_section_heading(first) {
            root = match_section_num(first, None);
            out.push(section);
            continue;
        }

        let merge = match root.as_deref() {
            Some(number) if !is_known_section_start(first, rules) => match list_marker(first) {
                Some(ListMarker::Outline(parts)) => parts.first().map(String::as_str) == Some(number),
                Some(ListMarker::Numbered(_) | ListMarker::Roman(_)) => false,
                _ => true,
            },
            _ => false,
        };

        if !merge {
            root = None;
        }
        push_or_merge(&mut out, section, merge);
    }

    out
}

/// Merge a section into its predecessor when its first line is a list
/// child of that section.
pub fn combine_by_section_nums(sections: Sections, rules: &DocumentFamilyRules) -> Sections {
    let mut out = Sections::new();

    for section in sections {
        let first = first_line(&section);
        let merge = !is_known_section_start(first, rules)
            && out.last().is_some_and(|last| is_list_child(first, last));
        push_or_merge(&mut out, section, merge);
    }

    out
}

/// Collect everything after an enclosure title into one section, up to the
/// next enclosure, glossary or table of contents.
pub fn combine_enclosures(sections: Sections) -> Sections {
    let mut out = Sections::new();
    let mut current_title: Option<String> = None;

    for section in sections {
        let first = first_line(&section).to_string();

        if is_enclosure_title(&first) {
            let repeats = current_title
                .as_ref()
                .is_some_and(|title| is_enclosure_continuation(&first, std::slice::from_ref(title)));
            if !repeats {
                current_title = Some(first);
            }
            push_or_merge(&mut out, section, repeats);
            continue;
        }

        if is_glossary_start(&first) || is_toc_start(&first) {
            current_title = None;
        }
        push_or_merge(&mut out, section, current_title.is_some());
    }

    out
}

fn is_enclosure_list_entry(line: &str) -> bool {
    ENCLOSURE_LIST_ENTRY.is_match(line) && !is_enclosure_title(line) && !is_toc(line)
}

/// Keep an `Enclosures` list (`1. References`, `2. Responsibilities`,
/// `Glossary`) in the section that introduces it.
pub fn combine_enclosures_list(sections: Sections) -> Sections {
    let mut out = Sections::new();
    let mut in_list = false;

    for section in sections {
        let merge = in_list
            && !out.is_empty()
            && section.iter().all(|line| is_enclosure_list_entry(line));

        in_list = if merge {
            true
        } else {
            section
                .iter()
                .rposition(|line| ENCLOSURES_HEADER.is_match(line))
                .is_some_and(|at| section[at + 1..].iter().all(|line| is_enclosure_list_entry(line)))
        };
        push_or_merge(&mut out, section, merge);
    }

    out
}

fn continues_glossary(first: &str, rules: &DocumentFamilyRules) -> bool {
    is_glossary_continuation(first) || is_glossary_start(first) || !is_known_section_start(first, rules)
}

/// Merge a glossary heading with all its continuation sections.
pub fn combine_glossary(sections: Sections, rules: &DocumentFamilyRules) -> Sections {
    let mut out = Sections::new();
    let mut in_glossary = false;

    for section in sections {
        let first = first_line(&section);
        let merge = in_glossary && continues_glossary(first, rules);
        in_glossary = merge || is_glossary_start(first);
        push_or_merge(&mut out, section, merge);
    }

    out
}

/// [`combine_glossary`], also folding a `REFERENCES` section that bleeds
/// into the glossary, and the non-heading sections it carries, into the
/// glossary section.
pub fn combine_glossary_then_references(sections: Sections, rules: &DocumentFamilyRules) -> Sections {
    let mut out = Sections::new();
    let mut in_glossary = false;

    for section in sections {
        let first = first_line(&section);
        let merge = in_glossary && (continues_glossary(first, rules) || REFERENCES_START.is_match(first));
        in_glossary = merge || is_glossary_start(first);
        push_or_merge(&mut out, section, merge);
    }

    out
}

fn is_title_line(line: &str, rules: &DocumentFamilyRules) -> bool {
    is_known_section_start(line, rules) || (is_heading_shaped(line) && list_marker(line).is_none())
}

fn same_title(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

/// Drop later copies of a section's title line, and fold a following
/// section that only restates the title on a continuation page.
pub fn remove_repeated_section_titles(sections: Sections, rules: &DocumentFamilyRules) -> Sections {
    let mut out: Sections = Vec::new();

    for section in sections {
        let Some((title, rest)) = section.split_first() else {
            continue;
        };

        let continues_previous = out.last().is_some_and(|last| {
            let previous_title = first_line(last);
            is_title_line(previous_title, rules) && same_title(previous_title, title)
        });

        if continues_previous {
            if let Some(last) = out.last_mut() {
                last.extend(rest.iter().cloned());
            }
            continue;
        }

        let mut cleaned = vec![title.clone()];
        if is_title_line(title, rules) {
            cleaned.extend(rest.iter().filter(|line| !same_title(line, title)).cloned());
        } else {
            cleaned.extend(rest.iter().cloned());
        }
        out.push(cleaned);
    }

    out
}
