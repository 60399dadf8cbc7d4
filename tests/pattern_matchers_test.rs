use rstest::rstest;
use section_parse::PatternError;
use section_parse::document::parsing::*;
use section_parse::document::{
    DocumentFamily, NUMBERED_PURPOSE_START_PATTERN, NUMBERED_RESPONSIBILITIES_START_PATTERN,
};

#[rstest]
#[case("1. PURPOSE.", Some(1))]
#[case("(2) Coordinate with the Joint Staff.", Some(2))]
#[case("3) Monitor compliance.", Some(3))]
#[case("hello 1.", None)]
#[case("See paragraph 4.", None)]
#[case("", None)]
fn numbered_list_items_only_at_line_start(#[case] text: &str, #[case] expected: Option<u32>) {
    assert_eq!(match_num_list_item(text), expected);
}

#[rstest]
#[case("I.  Background and Current Situation", Some(1))]
#[case("II.  Operations Status and Update:", Some(2))]
#[case("IX. Annex", Some(9))]
#[case("XLARGE shirts are available", None)]
#[case("VV. not roman", None)]
fn roman_numeral_items(#[case] text: &str, #[case] expected: Option<u32>) {
    assert_eq!(match_roman_numerals(text), expected);
}

#[rstest]
#[case("a. Background.", true)]
#[case("aa. Continued lettering.", true)]
#[case("(a) Sub item", true)]
#[case("reference (a)", false)]
#[case("a.Background", false)]
#[case("1. PURPOSE.", false)]
fn alpha_list_items(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_alpha_list_item(text), expected);
}

#[rstest]
#[case("SECTION 4.USES AND DISCLOSURES OF PHI ", None, Some("4"))]
#[case("A.2. Scope", None, Some("A"))]
#[case("1.14. Cancellation", None, Some("1"))]
#[case("1.14. Cancellation", Some("1"), Some("1"))]
#[case("1.14. Cancellation", Some("2"), None)]
#[case("No heading here", None, None)]
fn section_numbers(#[case] text: &str, #[case] expected: Option<&str>, #[case] result: Option<&str>) {
    assert_eq!(match_section_num(text, expected).as_deref(), result);
}

#[test]
fn enclosure_numbers() {
    assert_eq!(
        match_enclosure_num("Enclosure 4", None, "str"),
        Ok(Some(EnclosureNum::Str("4".to_string())))
    );
    assert_eq!(
        match_enclosure_num("E1. Enclosure 1", None, "int"),
        Ok(Some(EnclosureNum::Int(1)))
    );
    assert_eq!(
        match_enclosure_num("Enclosure 4", Some("4"), "bool"),
        Ok(Some(EnclosureNum::Bool(true)))
    );
    assert!(matches!(
        match_enclosure_num("", None, "bogus_type"),
        Err(PatternError::UnsupportedReturnType(_))
    ));
}

#[test]
fn next_letter_sequence() {
    assert_eq!(next_letter("m"), Ok('n'));
    assert_eq!(next_letter("a"), Ok('b'));
    assert!(matches!(next_letter("z"), Err(PatternError::InvalidLetter(_))));
    assert!(next_letter("ab").is_err());
    assert!(next_letter("4").is_err());
}

#[rstest]
#[case("SECTION 1: GENERAL ISSUANCE INFORMATION .......... 3", true)]
#[case("ENCLOSURE 2  RESPONSIBILITIES . . . . . . 12", true)]
#[case("Table of Contents", true)]
#[case("1. PURPOSE. This instruction establishes policy.", false)]
fn table_of_contents_lines(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_toc(text), expected);
}

#[rstest]
#[case("G.4. Terms", true)]
#[case("34 GLOSSARY", true)]
#[case("PART II. DEFINITIONS", true)]
#[case("The glossary lists terms.", false)]
fn glossary_continuations(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_glossary_continuation(text), expected);
}

#[rstest]
#[case("ENCLOSURE 2", &["ENCLOSURE 2"], true)]
#[case("RESPONSIBILITIES", &["ENCLOSURE 2"], true)]
#[case("APPENDIX 1 TO ENCLOSURE 2", &["ENCLOSURE 1", "ENCLOSURE 2"], true)]
#[case("ENCLOSURE 3", &["ENCLOSURE 2"], false)]
#[case("RESPONSIBILITIES", &[], false)]
fn enclosure_continuations(#[case] title: &str, #[case] titles: &[&str], #[case] expected: bool) {
    assert_eq!(is_enclosure_continuation(title, titles), expected);
}

#[rstest]
#[case("4.", &["1. PURPOSE.", "(1) first", "(2) second", "(3) third"], true)]
#[case("(4) next", &["(3) third"], true)]
#[case("c. third", &["a. first", "b. second"], true)]
#[case("(5) skipped", &["(3) third"], false)]
#[case("plain text", &["(3) third"], false)]
fn next_numbered_items(#[case] candidate: &str, #[case] preceding: &[&str], #[case] expected: bool) {
    assert_eq!(is_next_num_list_item(candidate, preceding), expected);
}

#[rstest]
#[case(
    "III.  Point(s) of Contact",
    &["I.  Background and Current Situation", "II.  Operations Status and Update:"],
    true
)]
#[case("1.2. Next", &["1.1. First"], true)]
#[case("E2.1.2. Second duty.", &["E2.1.1. First duty."], true)]
#[case("E3.1. Other enclosure.", &["E2.1.1. First duty."], false)]
#[case("a. first", &["3. POLICY. It is DoD policy that:"], true)]
#[case("2. APPLICABILITY.", &["1. PURPOSE.", "a. first"], false)]
fn list_children(#[case] candidate: &str, #[case] preceding: &[&str], #[case] expected: bool) {
    assert_eq!(is_list_child(candidate, preceding), expected);
}

#[rstest]
#[case("12", true)]
#[case("Page 3 of 10", true)]
#[case("DoDI 5400.11, March 16, 2015", true)]
#[case("Change 1, 10/15/2020", true)]
#[case("13 ENCLOSURE 2", true)]
#[case("(INTENTIONALLY BLANK)", true)]
#[case("A-3", true)]
#[case("ENCLOSURE 2", false)]
#[case("FY2024", false)]
#[case("E3", false)]
#[case("ab12", false)]
#[case("1. PURPOSE. This instruction reissues DoDI 5400.11.", false)]
fn running_header_noise(#[case] line: &str, #[case] expected: bool) {
    assert_eq!(should_skip(line, "DoDI 5400.11"), expected);
}

#[test]
fn cjcs_numbered_start_patterns() {
    let text = "\n \n6.  Responsibilities.  See Enclosure A. \n \n7.  Summary of Changes";
    let found = NUMBERED_RESPONSIBILITIES_START_PATTERN
        .find(text)
        .map(|m| m.as_str());
    assert_eq!(found, Some("\n \n6.  Responsibilities"));

    assert!(NUMBERED_PURPOSE_START_PATTERN.is_match("1.  Purpose.  This instruction"));
    assert!(!NUMBERED_PURPOSE_START_PATTERN.is_match("The purpose of paragraph 1 is"));
    assert!(!NUMBERED_RESPONSIBILITIES_START_PATTERN.is_match("Responsibilities are in Enclosure B."));
}

#[rstest]
#[case("DoDI", Some(DocumentFamily::Dod))]
#[case("DTM", Some(DocumentFamily::Dod))]
#[case("CJCSM", Some(DocumentFamily::Cjcs))]
#[case("OPNAVINST", Some(DocumentFamily::Navy))]
#[case("MCO", Some(DocumentFamily::Navy))]
#[case("EO", None)]
#[case("", None)]
fn families_from_doc_type(#[case] doc_type: &str, #[case] expected: Option<DocumentFamily>) {
    assert_eq!(DocumentFamily::from_doc_type(doc_type), expected);
}
