//! Labeled section lookups
//!
//! Read-only queries over a parsed document's `all_sections`. Every accessor
//! re-matches the family's heading patterns and returns a (possibly empty)
//! list of lines; none of them fail.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::family::DocumentFamilyRules;
use super::models::*;
use super::parsing::heading::{is_enclosure_continuation, is_enclosure_title};
use super::parsing::list::is_list_child;
use super::parsing::numbering::{ListMarker, list_marker};
use super::segmenter::is_known_section_start;

/// Cleaned sections of one document plus its identity.
///
/// A document parsed with caller-supplied rules keeps them, so its
/// accessors match the same heading patterns the pipeline used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub doc_type: String,
    pub doc_num: String,
    pub filename: String,
    pub family: DocumentFamily,
    pub all_sections: Sections,
    #[serde(skip)]
    pub(crate) custom_rules: Option<Arc<DocumentFamilyRules>>,
}

/// Lines that carry a section's heading: the first line, plus the second
/// when the first is a bare enclosure title (`ENCLOSURE 2` / `RESPONSIBILITIES`).
pub fn heading_lines(section: &[String]) -> &[String] {
    match section {
        [first, _, ..] if is_enclosure_title(first) => &section[..2],
        [_, ..] => &section[..1],
        [] => &[],
    }
}

/// Label of a section under `rules`, by heading priority.
pub fn classify_section(section: &[String], rules: &DocumentFamilyRules) -> Option<SectionLabel> {
    let headings = heading_lines(section);
    rules
        .heading_priority()
        .find(|&label| headings.iter().any(|line| rules.matches_label(label, line)))
}

/// Lines of the section labeled `label`.
///
/// Takes the first section whose heading matches the label, then absorbs
/// the sections that continue it (same enclosure, or nested list items).
/// When no section heading matches, falls back to a subheading inside a
/// merged section, sliced up to the next sibling heading. Enclosures return
/// every enclosure section.
pub fn find_section(sections: &[Section], label: SectionLabel, rules: &DocumentFamilyRules) -> Vec<String> {
    let heading_matches = |section: &Section| {
        heading_lines(section)
            .iter()
            .any(|line| rules.matches_label(label, line))
    };

    if label == SectionLabel::Enclosures {
        return sections
            .iter()
            .filter(|section| heading_matches(*section))
            .flatten()
            .cloned()
            .collect();
    }

    let Some(start) = sections.iter().position(heading_matches) else {
        return subheading_slice(sections, label, rules);
    };

    let mut lines = sections[start].clone();
    for next in &sections[start + 1..] {
        if !continues_section(&lines, next, rules) {
            break;
        }
        lines.extend(next.iter().cloned());
    }
    lines
}

fn continues_section(current: &[String], next: &[String], rules: &DocumentFamilyRules) -> bool {
    let (Some(title), Some(first)) = (current.first(), next.first()) else {
        return false;
    };

    if is_enclosure_title(title) {
        return is_enclosure_continuation(first, std::slice::from_ref(title));
    }
    !is_known_section_start(first, rules) && is_list_child(first, current)
}

fn subheading_slice(sections: &[Section], label: SectionLabel, rules: &DocumentFamilyRules) -> Vec<String> {
    for section in sections {
        let Some(start) = section
            .iter()
            .position(|line| rules.matches_label(label, line))
        else {
            continue;
        };

        let start_marker = list_marker(&section[start]);
        let end = section[start + 1..]
            .iter()
            .position(|line| ends_subsection(start_marker.as_ref(), line, rules))
            .map_or(section.len(), |offset| start + 1 + offset);
        return section[start..end].to_vec();
    }

    Vec::new()
}

/// `line` is a heading at the same or a shallower level than `start`.
fn ends_subsection(start: Option<&ListMarker>, line: &str, rules: &DocumentFamilyRules) -> bool {
    if is_known_section_start(line, rules) {
        return true;
    }

    let (Some(start), Some(marker)) = (start, list_marker(line)) else {
        return false;
    };

    match (start, &marker) {
        (ListMarker::Outline(start), ListMarker::Outline(parts)) => parts.len() <= start.len(),
        (ListMarker::Numbered(_), ListMarker::Numbered(_) | ListMarker::Roman(_))
        | (ListMarker::Roman(_), ListMarker::Roman(_))
        | (ListMarker::Parenthesized(_), ListMarker::Parenthesized(_)) => true,
        (
            ListMarker::Alpha { parenthesized, .. },
            ListMarker::Alpha {
                parenthesized: other,
                ..
            },
        ) => parenthesized == other,
        (
            ListMarker::Alpha { .. } | ListMarker::Parenthesized(_),
            ListMarker::Numbered(_) | ListMarker::Outline(_) | ListMarker::Roman(_),
        ) => true,
        _ => false,
    }
}

impl ParsedDocument {
    pub fn identity(&self) -> DocumentIdentity {
        DocumentIdentity::new(&self.doc_type, &self.doc_num, &self.filename)
    }

    /// Rules behind the accessors: the ones the document was parsed with,
    /// or the family's built-in table.
    pub fn rules(&self) -> &DocumentFamilyRules {
        self.custom_rules
            .as_deref()
            .unwrap_or_else(|| self.family.rules())
    }

    /// Lines of the section labeled `label`; empty when absent.
    pub fn section(&self, label: SectionLabel) -> Vec<String> {
        find_section(&self.all_sections, label, self.rules())
    }

    pub fn subject(&self) -> Vec<String> {
        self.section(SectionLabel::Subject)
    }

    pub fn table_of_contents(&self) -> Vec<String> {
        self.section(SectionLabel::TableOfContents)
    }

    pub fn purpose(&self) -> Vec<String> {
        self.section(SectionLabel::Purpose)
    }

    pub fn applicability(&self) -> Vec<String> {
        self.section(SectionLabel::Applicability)
    }

    pub fn authorities(&self) -> Vec<String> {
        self.section(SectionLabel::Authorities)
    }

    pub fn policy(&self) -> Vec<String> {
        self.section(SectionLabel::Policy)
    }

    pub fn responsibilities(&self) -> Vec<String> {
        self.section(SectionLabel::Responsibilities)
    }

    pub fn procedures(&self) -> Vec<String> {
        self.section(SectionLabel::Procedures)
    }

    pub fn organizations(&self) -> Vec<String> {
        self.section(SectionLabel::Organizations)
    }

    pub fn summary_of_change(&self) -> Vec<String> {
        self.section(SectionLabel::SummaryOfChange)
    }

    pub fn references(&self) -> Vec<String> {
        self.section(SectionLabel::References)
    }

    pub fn definitions(&self) -> Vec<String> {
        self.section(SectionLabel::Definitions)
    }

    pub fn glossary(&self) -> Vec<String> {
        self.section(SectionLabel::Glossary)
    }

    pub fn enclosures(&self) -> Vec<String> {
        self.section(SectionLabel::Enclosures)
    }

    pub fn label_of(&self, section: &[String]) -> Option<SectionLabel> {
        classify_section(section, self.rules())
    }

    /// Every label with a non-empty accessor result, in declaration order.
    pub fn labeled_sections(&self) -> Vec<(SectionLabel, Vec<String>)> {
        SectionLabel::ALL
            .into_iter()
            .map(|label| (label, self.section(label)))
            .filter(|(_, lines)| !lines.is_empty())
            .collect()
    }

    /// Serializable record with every accessor evaluated.
    pub fn record(&self) -> DocumentRecord {
        DocumentRecord {
            doc_type: self.doc_type.clone(),
            doc_num: self.doc_num.clone(),
            filename: self.filename.clone(),
            family: self.family,
            all_sections: self.all_sections.clone(),
            subject: self.subject(),
            table_of_contents: self.table_of_contents(),
            purpose: self.purpose(),
            applicability: self.applicability(),
            authorities: self.authorities(),
            policy: self.policy(),
            responsibilities: self.responsibilities(),
            procedures: self.procedures(),
            organizations: self.organizations(),
            summary_of_change: self.summary_of_change(),
            references: self.references(),
            definitions: self.definitions(),
            glossary: self.glossary(),
            enclosures: self.enclosures(),
        }
    }
}
