//! List relationship heuristics
//!
//! Compares a candidate line against the lines that precede it to decide
//! whether it continues a list (next sibling), nests under it (child), or
//! neither.

use super::numbering::{alpha_list_letter, is_successor, list_marker, ListMarker};

/// True for `a. ...`, `aa. ...` and `(a) ...` at line start.
pub fn is_alpha_list_item(text: &str) -> bool {
    alpha_list_letter(text).is_some()
}

fn comparable(candidate: &ListMarker, previous: &ListMarker) -> bool {
    matches!(
        (candidate, previous),
        (ListMarker::Roman(_), ListMarker::Roman(_))
            | (ListMarker::Alpha { .. }, ListMarker::Alpha { .. })
            | (ListMarker::Outline(_), ListMarker::Outline(_))
            | (
                ListMarker::Numbered(_) | ListMarker::Parenthesized(_),
                ListMarker::Numbered(_) | ListMarker::Parenthesized(_)
            )
    )
}

fn last_marker_where<'a, S, F>(preceding: &'a [S], mut accept: F) -> Option<ListMarker>
where
    S: AsRef<str> + 'a,
    F: FnMut(&ListMarker) -> bool,
{
    preceding
        .iter()
        .rev()
        .filter_map(|line| list_marker(line.as_ref()))
        .find(|marker| accept(marker))
}

/// True if `candidate` is the next item after the most recent comparable
/// item of `preceding_list`.
pub fn is_next_num_list_item<S: AsRef<str>>(candidate: &str, preceding_list: &[S]) -> bool {
    let Some(marker) = list_marker(candidate) else {
        return false;
    };

    last_marker_where(preceding_list, |previous| comparable(&marker, previous))
        .is_some_and(|previous| is_successor(&marker, &previous))
}

/// True if `candidate` nests under (or continues inside) the list that ends
/// `preceding_list`.
pub fn is_list_child<S: AsRef<str>>(candidate: &str, preceding_list: &[S]) -> bool {
    let Some(marker) = list_marker(candidate) else {
        return false;
    };

    match &marker {
        ListMarker::Outline(parts) => {
            // Same root, different number: "1.2" or "1.1.1" under "1.1",
            // "4.3" under "SECTION 4".
            last_marker_where(preceding_list, |m| matches!(m, ListMarker::Outline(_))).is_some_and(
                |previous| match previous {
                    ListMarker::Outline(previous) => {
                        parts.len() > 1 && parts.first() == previous.first() && *parts != previous
                    }
                    _ => false,
                },
            )
        }
        ListMarker::Roman(_) => {
            last_marker_where(preceding_list, |m| matches!(m, ListMarker::Roman(_)))
                .is_some_and(|previous| is_successor(&marker, &previous))
        }
        ListMarker::Alpha { letter, .. } => {
            let follows_alpha =
                last_marker_where(preceding_list, |m| matches!(m, ListMarker::Alpha { .. }))
                    .is_some_and(|previous| is_successor(&marker, &previous));

            // A new alpha sublist opens under a numbered item
            follows_alpha
                || (letter == "a"
                    && matches!(
                        last_marker_where(preceding_list, |_| true),
                        Some(ListMarker::Numbered(_) | ListMarker::Outline(_) | ListMarker::Roman(_))
                    ))
        }
        ListMarker::Parenthesized(n) => {
            let Some(previous) = last_marker_where(preceding_list, |_| true) else {
                return false;
            };
            match previous {
                ListMarker::Parenthesized(m) => *n == m + 1,
                ListMarker::Alpha { .. } | ListMarker::Numbered(_) | ListMarker::Outline(_) => {
                    *n == 1
                }
                ListMarker::Roman(_) => false,
            }
        }
        ListMarker::Numbered(n) => {
            // Decimal items only nest under roman headings
            *n == 1
                && matches!(
                    last_marker_where(preceding_list, |_| true),
                    Some(ListMarker::Roman(_))
                )
        }
    }
}
