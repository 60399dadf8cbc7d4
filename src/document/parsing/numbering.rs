//! List-marker and numbering recognition
//!
//! Pure matchers answering bounded questions about the leading marker of a
//! single line: decimal items (`1.`), parenthesized items (`(2)`, `3)`),
//! roman numerals (`II.`), alpha items (`a.`, `aa.`, `(a)`) and dotted
//! outline numbers (`SECTION 4`, `4.1.`, `E2.1.2.`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PatternError;

static NUM_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{1,3})\.(?:\s|$)").unwrap());

static NUM_PARENTHESES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\(?(\d{1,3})\)(?:\s|$)").unwrap());

static ROMAN_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([IVXLCDM]{1,8})[.)](?:\s|$)").unwrap());

static ROMAN_VALID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})$").unwrap()
});

static ALPHA_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:([a-z]{1,2})\.|\(([a-z]{1,2})\))(?:\s|$)").unwrap());

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*section\s+([A-Z]?\d{1,3})\b").unwrap());

static DOTTED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*((?:[A-Z]{1,2}\d{0,2}|\d{1,3})(?:\.\d{1,3})+)\.?(?:\s|$)").unwrap()
});

/// Leading marker of a list item or numbered heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    /// `SECTION 4`, `4.1.`, `E2.1.2.`, `G.3.`
    Outline(Vec<String>),
    /// `1.`
    Numbered(u32),
    /// `(2)` or `3)`
    Parenthesized(u32),
    /// `II.`
    Roman(u32),
    /// `a.`, `aa.` or `(a)`
    Alpha { letter: String, parenthesized: bool },
}

impl ListMarker {
    fn number(&self) -> Option<u32> {
        match self {
            ListMarker::Numbered(n) | ListMarker::Parenthesized(n) => Some(*n),
            _ => None,
        }
    }
}

/// Match a decimal `1.` item at line start.
pub fn match_num_dot(text: &str) -> Option<u32> {
    NUM_DOT.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Match a `(2)` or `3)` item at line start.
pub fn match_num_parentheses(text: &str) -> Option<u32> {
    NUM_PARENTHESES.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Match any numbered list item at line start.
pub fn match_num_list_item(text: &str) -> Option<u32> {
    match_num_dot(text).or_else(|| match_num_parentheses(text))
}

/// Match a leading uppercase roman numeral item such as `III.`.
pub fn match_roman_numerals(text: &str) -> Option<u32> {
    let token = ROMAN_TOKEN.captures(text)?.get(1)?.as_str();
    roman_to_int(token)
}

pub fn roman_to_int(token: &str) -> Option<u32> {
    if token.is_empty() || !ROMAN_VALID.is_match(token) {
        return None;
    }

    let value = |c: char| match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => 0,
    };

    let digits: Vec<u32> = token.chars().map(value).collect();
    let mut total = 0;
    for (i, &digit) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(&next) if next > digit => total -= digit as i64,
            _ => total += digit as i64,
        }
    }

    u32::try_from(total).ok().filter(|&n| n > 0)
}

/// Letter of a leading alpha list item (`a.`, `aa.`, `(a)`).
pub fn alpha_list_letter(text: &str) -> Option<(String, bool)> {
    let captures = ALPHA_ITEM.captures(text)?;
    let (letter, parenthesized) = match (captures.get(1), captures.get(2)) {
        (Some(letter), _) => (letter.as_str(), false),
        (None, Some(letter)) => (letter.as_str(), true),
        _ => return None,
    };

    // Doubled markers repeat the same letter ("aa.")
    let mut chars = letter.chars();
    let first = chars.next()?;
    if chars.any(|c| c != first) {
        return None;
    }

    Some((letter.to_string(), parenthesized))
}

/// Successor of a single letter, preserving case. The sequence does not
/// wrap: `z`/`Z` has no successor and returns [`PatternError::InvalidLetter`],
/// as does anything other than one ASCII letter. Marker rollover to `aa`
/// lives in `next_alpha_marker`.
pub fn next_letter(letter: &str) -> Result<char, PatternError> {
    let mut chars = letter.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(PatternError::InvalidLetter(letter.to_string()));
    };

    if !c.is_ascii_alphabetic() || c.eq_ignore_ascii_case(&'z') {
        return Err(PatternError::InvalidLetter(letter.to_string()));
    }

    Ok((c as u8 + 1) as char)
}

/// Successor of an alpha list marker, rolling `z` over to `aa`.
pub(crate) fn next_alpha_marker(letter: &str) -> Option<String> {
    let first = letter.chars().next()?;
    let width = letter.chars().count();
    match next_letter(&first.to_string()) {
        Ok(next) => Some(next.to_string().repeat(width)),
        Err(_) if first.eq_ignore_ascii_case(&'z') => {
            Some(if first.is_ascii_uppercase() { "A" } else { "a" }.repeat(width + 1))
        }
        Err(_) => None,
    }
}

/// Components of a `SECTION N` or dotted outline number.
pub fn outline_number(text: &str) -> Option<Vec<String>> {
    if let Some(captures) = SECTION_HEADING.captures(text) {
        return Some(vec![captures.get(1)?.as_str().to_ascii_uppercase()]);
    }

    let dotted = DOTTED_NUMBER.captures(text)?.get(1)?.as_str();
    Some(dotted.split('.').map(str::to_string).collect())
}

/// Classify the leading marker of a line, if it has one.
pub fn list_marker(text: &str) -> Option<ListMarker> {
    if let Some(parts) = outline_number(text) {
        return Some(ListMarker::Outline(parts));
    }
    if let Some(n) = match_roman_numerals(text) {
        return Some(ListMarker::Roman(n));
    }
    if let Some(n) = match_num_dot(text) {
        return Some(ListMarker::Numbered(n));
    }
    if let Some(n) = match_num_parentheses(text) {
        return Some(ListMarker::Parenthesized(n));
    }
    alpha_list_letter(text).map(|(letter, parenthesized)| ListMarker::Alpha {
        letter,
        parenthesized,
    })
}

/// True when `candidate` directly follows `previous` in the same sequence.
/// Decimal and parenthesized numbering count as one sequence.
pub(crate) fn is_successor(candidate: &ListMarker, previous: &ListMarker) -> bool {
    match (candidate, previous) {
        (ListMarker::Roman(n), ListMarker::Roman(m)) => *n == m + 1,
        (ListMarker::Alpha { letter, .. }, ListMarker::Alpha { letter: prev, .. }) => {
            next_alpha_marker(prev).as_deref() == Some(letter.as_str())
        }
        (ListMarker::Outline(c), ListMarker::Outline(p)) if c.len() == p.len() => {
            let (Some((c_last, c_prefix)), Some((p_last, p_prefix))) =
                (c.split_last(), p.split_last())
            else {
                return false;
            };
            match (c_last.parse::<u32>(), p_last.parse::<u32>()) {
                (Ok(c_last), Ok(p_last)) => c_prefix == p_prefix && c_last == p_last + 1,
                _ => false,
            }
        }
        _ => match (candidate.number(), previous.number()) {
            (Some(n), Some(m)) => n == m + 1,
            _ => false,
        },
    }
}
