//! Heading and noise detection
//!
//! This module recognizes section-number headings, enclosure markers,
//! table-of-contents lines, glossary markers and running headers/footers.
//! Every matcher degrades to "no match" on malformed input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use tracing::warn;

use super::numbering::outline_number;
use crate::error::PatternError;

static ENCLOSURE_NUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:E\d{1,2}\.\s*)?enclosure\s+(\d{1,2}|[A-Z])\b").unwrap()
});

static ENCLOSURE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:E\d{1,2}\.\s*)?(?:ENCLOSURE\s+(?:\d{1,2}|[A-Z])(?:\s*[:.-]\s*[A-Z][A-Z0-9 ,/&'()-]*)?|Enclosure\s+(?:\d{1,2}|[A-Z]))\s*$",
    )
    .unwrap()
});

static APPENDIX_TO_ENCLOSURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:APPENDIX|ANNEX|TAB)\s+[A-Z0-9]{1,2}\s+TO\s+ENCLOSURE\s+(\d{1,2}|[A-Z])\b")
        .unwrap()
});

static ENCLOSURE_NON_BREAKING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:RESPONSIBILITIES|PROCEDURES)\b").unwrap());

static TOC_LEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\.\s?){4,}\s*(?:[A-Z]{1,2}-?)?\d{1,4}\s*$|\t\s*(?:[A-Z]{1,2}-)?\d{1,4}\s*$")
        .unwrap()
});

static TOC_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)table\s+of\s+contents").unwrap());

static GLOSSARY_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:GLOSSARY\b|Glossary\s*$)").unwrap());

static GLOSSARY_CONTINUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:G\.\d{1,2}\.?(?:\s|$)|\d{1,4}\s+GLOSSARY\s*$|GL-\d{1,3}\s*$|PART\s+[IV]{1,3}\.?\s*(?:-{1,2}|:)?\s*(?:ABBREVIATIONS|ACRONYMS|DEFINITIONS|TERMS))",
    )
    .unwrap()
});

/// `12`, `Page 3 of 10`, or an appendix page such as `A-3` / `GL-2`.
static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?i:page)\s+)?(?:[A-Z]{1,2}-)?\d{1,4}(?:\s+(?i:of)\s+\d{1,4})?$").unwrap()
});

static INTENTIONALLY_BLANK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\(\s*intentionally\s+(?:left\s+)?blank\s*\)|\b(?:this\s+page\s+(?:is\s+)?)?intentionally\s+(?:left\s+)?blank\b\.?",
    )
    .unwrap()
});

static CHANGE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^change\s+\d{1,2}\s*,?\s*(?:\d{1,2}/\d{1,2}/\d{2,4}|[A-Z][a-z]+\s+\d{1,2},?\s*\d{4})",
    )
    .unwrap()
});

static PAGE_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:\d{1,4}\s+(?:ENCLOSURE\s+(?:\d{1,2}|[A-Z])|APPENDIX\s+[A-Z0-9]{1,2}(?:\s+TO\s+ENCLOSURE\s+(?:\d{1,2}|[A-Z]))?|GLOSSARY|REFERENCES|CONTENTS)|ENCLOSURE\s+(?:\d{1,2}|[A-Z])\s+\d{1,4})$",
    )
    .unwrap()
});

/// Match a leading `Section N` or dotted heading and return its first
/// component. With `expected`, only an exact string match counts.
pub fn match_section_num(text: &str, expected: Option<&str>) -> Option<String> {
    let number = outline_number(text)?.into_iter().next()?;
    match expected {
        Some(expected) if expected != number => None,
        _ => Some(number),
    }
}

/// Shape of the value returned by [`match_enclosure_num`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureReturnType {
    Str,
    Int,
    Bool,
}

impl FromStr for EnclosureReturnType {
    type Err = PatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "str" => Ok(EnclosureReturnType::Str),
            "int" => Ok(EnclosureReturnType::Int),
            "bool" => Ok(EnclosureReturnType::Bool),
            other => Err(PatternError::UnsupportedReturnType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnclosureNum {
    Str(String),
    Int(u32),
    Bool(bool),
}

/// Number (or letter) of a leading enclosure marker.
pub fn enclosure_number(text: &str) -> Option<String> {
    Some(ENCLOSURE_NUM.captures(text)?.get(1)?.as_str().to_ascii_uppercase())
}

/// Extract an enclosure number from `Enclosure 4` or `E1. Enclosure 1`.
///
/// `return_type` is one of `str`, `int` or `bool`. With `bool` the result is
/// always `Some`, telling whether the number equals `expected`. With `str` or
/// `int` a given `expected` filters the match. Letters that do not parse as
/// integers yield `None` for `int`.
pub fn match_enclosure_num(
    text: &str,
    expected: Option<&str>,
    return_type: &str,
) -> Result<Option<EnclosureNum>, PatternError> {
    let return_type: EnclosureReturnType = return_type.parse()?;
    let number = enclosure_number(text);

    let result = match return_type {
        EnclosureReturnType::Bool => Some(EnclosureNum::Bool(
            number.is_some() && number.as_deref() == expected.map(str::trim),
        )),
        _ => {
            let number = number.filter(|n| expected.is_none_or(|e| e.trim() == n));
            match return_type {
                EnclosureReturnType::Int => number
                    .and_then(|n| n.parse().ok())
                    .map(EnclosureNum::Int),
                _ => number.map(EnclosureNum::Str),
            }
        }
    };

    Ok(result)
}

/// A standalone enclosure title line such as `ENCLOSURE 2`.
pub fn is_enclosure_title(text: &str) -> bool {
    ENCLOSURE_TITLE.is_match(text)
}

/// True if `title` belongs under the most recent enclosure heading.
pub fn is_enclosure_continuation<S: AsRef<str>>(title: &str, enclosure_titles: &[S]) -> bool {
    let Some(current) = enclosure_titles.last() else {
        return false;
    };

    if normalize(title) == normalize(current.as_ref()) {
        return true;
    }

    if ENCLOSURE_NON_BREAKING.is_match(title) {
        return true;
    }

    let current_number = enclosure_number(current.as_ref());
    if let Some(captures) = APPENDIX_TO_ENCLOSURE.captures(title) {
        let parent = captures.get(1).map(|m| m.as_str().to_ascii_uppercase());
        return parent.is_some() && parent == current_number;
    }

    // Continuation pages may repeat the enclosure marker alone
    is_enclosure_title(title) && current_number.is_some() && enclosure_number(title) == current_number
}

/// Heuristic table-of-contents shape: leader dots before a page number, or
/// a literal "table of contents".
pub fn is_toc(text: &str) -> bool {
    TOC_LEADER.is_match(text) || TOC_TITLE.is_match(text)
}

pub fn is_toc_start(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() < 40 && TOC_TITLE.is_match(trimmed)
}

pub fn is_glossary_start(text: &str) -> bool {
    GLOSSARY_START.is_match(text)
}

/// Glossary entry markers that can appear mid-document (`G.4`,
/// `34 GLOSSARY`, `PART II. DEFINITIONS`).
pub fn is_glossary_continuation(text: &str) -> bool {
    GLOSSARY_CONTINUATION.is_match(text)
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Remove `(INTENTIONALLY BLANK)` filler from a line, keeping whatever else
/// shares the line.
pub(crate) fn strip_filler(line: &str) -> std::borrow::Cow<'_, str> {
    INTENTIONALLY_BLANK.replace_all(line, "")
}

/// Running header/footer filter for one document.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    identifier: Option<Regex>,
    extra: Vec<Regex>,
}

impl NoiseFilter {
    pub fn new(doc_identifier: &str) -> Self {
        let doc_identifier = doc_identifier.trim();
        let identifier = if doc_identifier.is_empty() {
            None
        } else {
            let escaped = doc_identifier
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+");
            // Header forms: "DoDI 5400.11", "DoDI 5400.11, March 16, 2015",
            // optionally with a change number and trailing page number.
            let pattern = format!(
                r"(?i)^{escaped}(?:\s*,\s*(?:change\s+\d{{1,2}}\s*,?\s*)?(?:[A-Z][a-z]+\s+\d{{1,2}},?\s*\d{{4}}|\d{{1,2}}/\d{{1,2}}/\d{{2,4}}))?(?:\s+\d{{1,4}})?$"
            );
            Regex::new(&pattern).ok()
        };

        Self {
            identifier,
            extra: Vec::new(),
        }
    }

    /// Add caller-supplied noise patterns; invalid ones are skipped.
    pub fn with_extra_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        for pattern in patterns {
            match Regex::new(pattern.as_ref()) {
                Ok(regex) => self.extra.push(regex),
                Err(err) => warn!(pattern = pattern.as_ref(), error = %err, "ignoring invalid noise pattern"),
            }
        }
        self
    }

    /// True when the line is pure running-header/footer noise.
    pub fn should_skip(&self, line: &str) -> bool {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            return false;
        }

        if PAGE_NUMBER.is_match(&line) || PAGE_FOOTER.is_match(&line) {
            return true;
        }

        if strip_filler(&line).trim().is_empty() {
            return true;
        }

        if let Some(found) = CHANGE_DATE.find(&line) {
            let rest = line[found.end()..].trim();
            if rest.is_empty() || PAGE_NUMBER.is_match(rest) || PAGE_FOOTER.is_match(rest) {
                return true;
            }
        }

        if self
            .identifier
            .as_ref()
            .is_some_and(|identifier| identifier.is_match(&line))
        {
            return true;
        }

        self.extra.iter().any(|pattern| pattern.is_match(&line))
    }
}

/// True when `line` is running-header/footer noise for the document
/// identified by `doc_identifier` (e.g. `DoDI 5400.11`).
pub fn should_skip(line: &str, doc_identifier: &str) -> bool {
    NoiseFilter::new(doc_identifier).should_skip(line)
}

/// Adapted sentence test: multiple sentences, long terminated text or
/// connective-heavy prose is not a heading.
pub(crate) fn is_likely_sentence(text: &str) -> bool {
    let text = text.trim();

    if text.matches(". ").count() > 1 {
        return true;
    }

    if text.len() > 80 && (text.ends_with('.') || text.ends_with('!') || text.ends_with('?')) {
        return true;
    }

    text.ends_with(',') || text.ends_with(';')
}

/// Short, title-like text: a candidate heading when set in bold.
pub(crate) fn is_heading_shaped(text: &str) -> bool {
    let text = text.trim();
    if text.len() < 3 || text.len() > 100 || text.contains('\n') {
        return false;
    }
    if is_likely_sentence(text) || is_toc(text) {
        return false;
    }
    if !text.chars().any(char::is_alphabetic) {
        return false;
    }

    let words = text.split_whitespace().count();
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();

    upper * 10 >= letters.len() * 8 || words <= 10
}
