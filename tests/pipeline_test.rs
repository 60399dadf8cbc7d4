use regex::Regex;
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;

use section_parse::document::parsing::{NoiseFilter, is_enclosure_title, should_skip};
use section_parse::document::{
    Block, DocumentFamily, DocumentFamilyRules, DocumentIdentity, DocumentRecord, ParseOptions,
    ParsedDocument, Pass, PassContext, SectionLabel, find_section, parse_blocks, parse_blocks_with,
    parse_text, post_process,
};

const DODI: &str = "\
DoD INSTRUCTION 5400.11
DOD PRIVACY AND CIVIL LIBERTIES PROGRAMS
References: See Enclosure 1
1. PURPOSE. This instruction reissues DoD Instruction 5400.11.
2. APPLICABILITY. This instruction applies to:
a. OSD and the Military Departments.
b. All DoD personnel.
3. POLICY. It is DoD policy that:
a. Privacy is protected.
4. RESPONSIBILITIES. See Enclosure 2.
5. EFFECTIVE DATE. This instruction is effective immediately.
Enclosures
1. References
2. Responsibilities
Glossary
DoDI 5400.11, January 29, 2019
1
ENCLOSURE 1
REFERENCES
(a) DoD Directive 5400.11, \"DoD Privacy Program\"
(b) Section 552a of title 5, United States Code
ENCLOSURE 2
RESPONSIBILITIES
1. DIRECTOR OF ADMINISTRATION. The Director shall:
a. Oversee the program.
13 ENCLOSURE 2
ENCLOSURE 2
2. HEADS OF COMPONENTS. The heads shall:
a. Designate an official.
GLOSSARY
PART I. ABBREVIATIONS AND ACRONYMS
DoD Department of Defense
PART II. DEFINITIONS
privacy. The right of an individual.
";

const CJCSI: &str = "\
CJCSI 3100.01E
JOINT STRATEGIC PLANNING SYSTEM
References: See Enclosure D.
1.  Purpose.  This instruction establishes the Joint Strategic Planning System.
2.  Superseded/Cancellation.  CJCSI 3100.01D is hereby superseded.
3.  Applicability.  This instruction applies to the Joint Staff.
4.  Policy.  See Enclosure A.
5.  Definitions.  See Glossary.
6.  Responsibilities.  See Enclosure B.
7.  Summary of Changes.  This revision updates the process.
ENCLOSURE A
POLICY
1.  General.  The system provides a framework.
a.  It supports the Chairman.
ENCLOSURE B
RESPONSIBILITIES
1.  Joint Staff.  The Director shall coordinate.
2.  Combatant Commands.  Commanders shall participate.
ENCLOSURE D
REFERENCES
a.  Title 10, United States Code
b.  CJCSI 3401.01E
GLOSSARY
PART I -- ABBREVIATIONS AND ACRONYMS
CJCS Chairman of the Joint Chiefs of Staff
";

const OPNAVINST: &str = "\
OPNAVINST 5210.20
Subj:  NAVY RECORDS MANAGEMENT PROGRAM
Ref:   (a) SECNAVINST 5210.8F
(b) 44 U.S.C. 3101
Encl:  (1) Records Disposition Schedule
1.  Purpose.  To issue policy for the records program.
2.  Cancellation.  OPNAVINST 5210.19.
3.  Applicability.  This instruction applies to all Navy commands.
4.  Policy.  Records will be managed per reference (a).
a.  Records must be preserved.
b.  Records must be accessible.
5.  Responsibilities.
a.  DNS shall oversee the program.
(1) Issue guidance.
(2) Monitor compliance.
b.  Commanders shall designate a records officer.
6.  Records Management.  Records created by this instruction are retained.
";

const DODI_GLOSSARY_FIRST: &str = "\
DoD INSTRUCTION 8910.01
1. PURPOSE. This instruction establishes policy for information collections.
2. APPLICABILITY. This instruction applies to OSD.
GLOSSARY
G.1. ACRONYMS.
DoD Department of Defense
REFERENCES
Section 552a of title 5, United States Code
";

fn dodi_identity() -> DocumentIdentity {
    DocumentIdentity::new("DoDI", "5400.11", "DoDI 5400.11.txt")
}

fn cjcsi_identity() -> DocumentIdentity {
    DocumentIdentity::new("CJCSI", "3100.01E", "CJCSI 3100.01E.txt")
}

fn opnavinst_identity() -> DocumentIdentity {
    DocumentIdentity::new("OPNAVINST", "5210.20", "OPNAVINST 5210.20.txt")
}

fn memo_blocks() -> Vec<Block> {
    vec![
        Block::plain("Quarterly Program Memo"),
        Block::plain("Purpose").bold(),
        Block::plain("This memo summarizes the quarter."),
        Block::plain("Background").bold(),
        Block::plain("The program began in 2019."),
        Block::plain("References").bold(),
        Block::plain("a. Program charter."),
        Block::plain("b. Annual plan."),
    ]
}

fn budget_memo_blocks() -> Vec<Block> {
    vec![
        Block::plain("Quarterly Budget Memo"),
        Block::plain("Purpose").bold(),
        Block::plain("This memo reports spending."),
        Block::plain("Budget").bold(),
        Block::plain("Fiscal year"),
        Block::plain("FY2024"),
        Block::plain("FY2025"),
        Block::plain("Total"),
        Block::plain("Staffing").bold(),
        Block::plain("Budget Office"),
        Block::plain("Analysts"),
    ]
}

fn parse(text: &str, identity: DocumentIdentity) -> ParsedDocument {
    parse_text(text, identity, &ParseOptions::default())
}

fn flattened(doc: &ParsedDocument) -> Vec<&str> {
    doc.all_sections.iter().flatten().map(String::as_str).collect()
}

#[cfg(test)]
mod dod_pipeline_tests {
    use super::*;

    #[test]
    fn test_dod_sections() {
        let doc = parse(DODI, dodi_identity());

        assert_eq!(doc.family, DocumentFamily::Dod);
        assert_eq!(doc.all_sections.len(), 9);
        assert_eq!(doc.all_sections[0][0], "DoD INSTRUCTION 5400.11");
        assert_eq!(
            doc.all_sections[5],
            vec![
                "5. EFFECTIVE DATE. This instruction is effective immediately.",
                "Enclosures",
                "1. References",
                "2. Responsibilities",
                "Glossary",
            ]
        );
        assert_eq!(
            doc.all_sections[7],
            vec![
                "ENCLOSURE 2",
                "RESPONSIBILITIES",
                "1. DIRECTOR OF ADMINISTRATION. The Director shall:",
                "a. Oversee the program.",
                "2. HEADS OF COMPONENTS. The heads shall:",
                "a. Designate an official.",
            ]
        );
    }

    #[test]
    fn test_dod_accessors() {
        let doc = parse(DODI, dodi_identity());

        assert_eq!(
            doc.purpose(),
            vec!["1. PURPOSE. This instruction reissues DoD Instruction 5400.11."]
        );
        assert_eq!(doc.applicability().len(), 3);
        assert_eq!(
            doc.policy(),
            vec!["3. POLICY. It is DoD policy that:", "a. Privacy is protected."]
        );
        assert_eq!(doc.responsibilities(), vec!["4. RESPONSIBILITIES. See Enclosure 2."]);
        assert_eq!(doc.references()[..2], ["ENCLOSURE 1", "REFERENCES"]);
        assert_eq!(doc.references().len(), 4);
        assert_eq!(doc.glossary()[0], "GLOSSARY");
        assert_eq!(doc.glossary().len(), 5);
        assert_eq!(
            doc.definitions(),
            vec!["PART II. DEFINITIONS", "privacy. The right of an individual."]
        );
        assert_eq!(doc.enclosures().len(), 10);

        assert!(doc.subject().is_empty());
        assert!(doc.table_of_contents().is_empty());
        assert!(doc.procedures().is_empty());
    }

    #[test]
    fn test_dod_drops_only_noise_and_repeated_titles() {
        let doc = parse(DODI, dodi_identity());

        let mut seen_titles = HashSet::new();
        let expected: Vec<&str> = DODI
            .lines()
            .filter(|line| !should_skip(line, "DoDI 5400.11"))
            .filter(|line| !is_enclosure_title(line) || seen_titles.insert(*line))
            .collect();

        assert_eq!(flattened(&doc), expected);
    }

    #[test]
    fn test_references_after_glossary_stay_in_glossary() {
        let identity = DocumentIdentity::new("DoDI", "8910.01", "DoDI 8910.01.txt");
        let doc = parse(DODI_GLOSSARY_FIRST, identity);

        assert_eq!(doc.all_sections.len(), 4);
        assert_eq!(
            doc.glossary(),
            vec![
                "GLOSSARY",
                "G.1. ACRONYMS.",
                "DoD Department of Defense",
                "REFERENCES",
                "Section 552a of title 5, United States Code",
            ]
        );
        assert_eq!(
            doc.references(),
            vec!["REFERENCES", "Section 552a of title 5, United States Code"]
        );
    }
}

#[cfg(test)]
mod cjcs_pipeline_tests {
    use super::*;

    #[test]
    fn test_cjcs_sections() {
        let doc = parse(CJCSI, cjcsi_identity());

        assert_eq!(doc.family, DocumentFamily::Cjcs);
        assert_eq!(doc.all_sections.len(), 12);
        assert_eq!(
            doc.all_sections[0],
            vec!["JOINT STRATEGIC PLANNING SYSTEM", "References: See Enclosure D."]
        );
        assert_eq!(
            doc.all_sections[11],
            vec![
                "GLOSSARY",
                "PART I -- ABBREVIATIONS AND ACRONYMS",
                "CJCS Chairman of the Joint Chiefs of Staff",
            ]
        );
    }

    #[test]
    fn test_cjcs_accessors() {
        let doc = parse(CJCSI, cjcsi_identity());

        assert_eq!(
            doc.purpose(),
            vec!["1.  Purpose.  This instruction establishes the Joint Strategic Planning System."]
        );
        assert_eq!(doc.responsibilities(), vec!["6.  Responsibilities.  See Enclosure B."]);
        assert_eq!(doc.policy(), vec!["4.  Policy.  See Enclosure A."]);
        assert_eq!(doc.definitions(), vec!["5.  Definitions.  See Glossary."]);
        assert_eq!(
            doc.summary_of_change(),
            vec!["7.  Summary of Changes.  This revision updates the process."]
        );
        assert_eq!(
            doc.references(),
            vec![
                "ENCLOSURE D",
                "REFERENCES",
                "a.  Title 10, United States Code",
                "b.  CJCSI 3401.01E",
            ]
        );
        assert_eq!(doc.enclosures().len(), 12);
        assert_eq!(doc.glossary().len(), 3);
    }
}

#[cfg(test)]
mod navy_pipeline_tests {
    use super::*;

    #[test]
    fn test_navy_sections_and_accessors() {
        let doc = parse(OPNAVINST, opnavinst_identity());

        assert_eq!(doc.family, DocumentFamily::Navy);
        assert_eq!(doc.all_sections.len(), 9);

        assert_eq!(doc.subject(), vec!["Subj:  NAVY RECORDS MANAGEMENT PROGRAM"]);
        assert_eq!(
            doc.references(),
            vec!["Ref:   (a) SECNAVINST 5210.8F", "(b) 44 U.S.C. 3101"]
        );
        assert_eq!(doc.enclosures(), vec!["Encl:  (1) Records Disposition Schedule"]);
        assert_eq!(doc.policy().len(), 3);
        assert_eq!(
            doc.responsibilities(),
            vec![
                "5.  Responsibilities.",
                "a.  DNS shall oversee the program.",
                "(1) Issue guidance.",
                "(2) Monitor compliance.",
                "b.  Commanders shall designate a records officer.",
            ]
        );
        assert!(doc.glossary().is_empty());
    }
}

#[cfg(test)]
mod generic_pipeline_tests {
    use super::*;

    #[test]
    fn test_bold_headings_open_sections() {
        let doc = parse_blocks(
            &memo_blocks(),
            DocumentIdentity::new("", "", "memo.docx"),
            &ParseOptions::default(),
        );

        assert_eq!(doc.family, DocumentFamily::Generic);
        assert_eq!(doc.all_sections.len(), 4);
        assert_eq!(doc.purpose(), vec!["Purpose", "This memo summarizes the quarter."]);
        assert_eq!(
            doc.references(),
            vec!["References", "a. Program charter.", "b. Annual plan."]
        );
        assert_eq!(doc.label_of(&doc.all_sections[2]), None);
        assert_eq!(doc.label_of(&doc.all_sections[3]), Some(SectionLabel::References));
    }

    #[test]
    fn test_custom_rules() {
        let rules = DocumentFamilyRules::new(
            DocumentFamily::Generic,
            Regex::new(r"^\s*ARTICLE\s+(\d{1,2})\b").unwrap(),
            Regex::new(r"^\s*ANNEX\b").unwrap(),
        )
        .with_label(
            SectionLabel::Purpose,
            Regex::new(r"^\s*ARTICLE\s+\d{1,2}\s*-\s*PURPOSE\b").unwrap(),
        )
        .with_label(
            SectionLabel::Definitions,
            Regex::new(r"^\s*ARTICLE\s+\d{1,2}\s*-\s*DEFINITIONS\b").unwrap(),
        )
        .with_passes(&[Pass::RemovePagebreaksAndNoise, Pass::RemoveRepeatedSectionTitles]);

        let blocks: Vec<Block> = [
            "CHARTER",
            "ARTICLE 1 - PURPOSE",
            "The board advises the director.",
            "ARTICLE 2 - DEFINITIONS",
            "Member means a voting member.",
            "ANNEX",
            "Signatures",
        ]
        .into_iter()
        .map(Block::plain)
        .collect();

        let rules = Arc::new(rules);
        let doc = parse_blocks_with(&blocks, DocumentIdentity::default(), Arc::clone(&rules), &[]);
        assert_eq!(doc.all_sections.len(), 4);
        assert_eq!(
            doc.purpose(),
            vec!["ARTICLE 1 - PURPOSE", "The board advises the director."]
        );
        assert_eq!(
            doc.definitions(),
            vec!["ARTICLE 2 - DEFINITIONS", "Member means a voting member."]
        );
        assert!(doc.glossary().is_empty());
        assert_eq!(doc.label_of(&doc.all_sections[1]), Some(SectionLabel::Purpose));
        assert_eq!(doc.label_of(&doc.all_sections[3]), None);
        assert_eq!(doc.record().definitions, doc.definitions());
        assert_eq!(
            find_section(&doc.all_sections, SectionLabel::Purpose, &rules),
            doc.purpose()
        );

        // the built-in generic table knows nothing about articles
        let builtin = parse_blocks(&blocks, DocumentIdentity::default(), &ParseOptions::default());
        assert!(builtin.purpose().is_empty());
        assert_eq!(doc.clone().purpose(), doc.purpose());
    }

    #[test]
    fn test_heading_shaped_cells_are_kept() {
        let blocks = budget_memo_blocks();
        let doc = parse_blocks(&blocks, DocumentIdentity::new("", "", "budget.docx"), &ParseOptions::default());

        assert_eq!(doc.all_sections.len(), 4);
        assert_eq!(
            doc.all_sections[2],
            vec!["Budget", "Fiscal year", "FY2024", "FY2025", "Total"]
        );
        assert_eq!(doc.all_sections[3], vec!["Staffing", "Budget Office", "Analysts"]);

        let texts: Vec<&str> = blocks.iter().map(|block| block.text.as_str()).collect();
        assert_eq!(flattened(&doc), texts);
    }
}

#[rstest]
#[case(DODI, dodi_identity())]
#[case(CJCSI, cjcsi_identity())]
#[case(OPNAVINST, opnavinst_identity())]
fn post_processing_is_idempotent(#[case] text: &str, #[case] identity: DocumentIdentity) {
    let noise = NoiseFilter::new(&identity.doc_identifier());
    let doc = parse(text, identity);
    let rules = doc.rules();
    let context = PassContext {
        noise: &noise,
        rules,
    };

    let again = post_process(doc.all_sections.clone(), rules.passes(), &context);
    assert_eq!(again, doc.all_sections);
}

#[rstest]
#[case(CJCSI, cjcsi_identity())]
#[case(OPNAVINST, opnavinst_identity())]
#[case(DODI_GLOSSARY_FIRST, DocumentIdentity::new("DoDI", "8910.01", ""))]
fn only_noise_lines_are_dropped(#[case] text: &str, #[case] identity: DocumentIdentity) {
    let identifier = identity.doc_identifier();
    let doc = parse(text, identity);
    assert!(doc.all_sections.iter().all(|section| !section.is_empty()));

    // These fixtures repeat no titles, so every other line survives in order
    let expected: Vec<&str> = text
        .lines()
        .filter(|line| !should_skip(line, &identifier))
        .collect();
    assert_eq!(flattened(&doc), expected);
}

#[rstest]
#[case(memo_blocks())]
#[case(budget_memo_blocks())]
fn generic_blocks_are_all_kept(#[case] blocks: Vec<Block>) {
    let doc = parse_blocks(&blocks, DocumentIdentity::default(), &ParseOptions::default());
    assert_eq!(doc.family, DocumentFamily::Generic);
    assert!(doc.all_sections.iter().all(|section| !section.is_empty()));

    let texts: Vec<&str> = blocks.iter().map(|block| block.text.as_str()).collect();
    assert_eq!(flattened(&doc), texts);
}

#[rstest]
#[case(DocumentFamily::Dod)]
#[case(DocumentFamily::Cjcs)]
#[case(DocumentFamily::Navy)]
#[case(DocumentFamily::Generic)]
fn empty_documents_have_empty_accessors(#[case] family: DocumentFamily) {
    let options = ParseOptions {
        family: Some(family),
        ..ParseOptions::default()
    };
    let doc = parse_text("", DocumentIdentity::default(), &options);

    assert!(doc.all_sections.is_empty());
    for label in SectionLabel::ALL {
        assert!(doc.section(label).is_empty());
    }
}

#[test]
fn record_round_trips_through_json() {
    let doc = parse(DODI, dodi_identity());
    let record = doc.record();

    let json = serde_json::to_string_pretty(&record).unwrap();
    assert!(json.contains("\"family\": \"dod\""));

    let parsed: DocumentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
    assert_eq!(parsed.purpose, doc.purpose());
    assert_eq!(parsed.all_sections, doc.all_sections);
}
