//! Document-family rules
//!
//! A [`DocumentFamilyRules`] value bundles everything that differs between
//! issuing authorities: how top-level numbered headings look, which
//! unnumbered titles open a section, the heading patterns behind each
//! section label (in priority order) and the post-processing pipeline.
//! The built-in tables are compiled once and shared read-only.

use once_cell::sync::Lazy;
use regex::Regex;

use super::cleanup::Pass;
use super::models::{DocumentFamily, SectionLabel};

/// CJCS numbered purpose heading, e.g. `1.  Purpose.`
pub static NUMBERED_PURPOSE_START_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{1,2}\.\s+Purpose\b").unwrap());

/// CJCS numbered responsibilities heading, e.g. `6.  Responsibilities.`
pub static NUMBERED_RESPONSIBILITIES_START_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{1,2}\.\s+Responsibilities\b").unwrap());

const TITLE_CASE_NUMBERED_HEADING: &str =
    r"^\s*(\d{1,2})\.\s+[A-Z][a-z]+(?:[/-][A-Z][a-z]+)?(?:\s+(?:[A-Z][A-Za-z()'/-]*|of|and|the|for|to|in|on|with))*[.:](?:\s|$)";

const UPPER_NUMBERED_HEADING: &str =
    r"^\s*(\d{1,2})\.\s+[A-Z]{2}[A-Z/&,'()-]*(?:\s+[A-Z/&,'()-]+)*[.:](?:\s|$)";

const UPPER_DOTTED_HEADING: &str =
    r"^\s*(?:[A-Z]{1,2}\d{0,2}|\d{1,2})(?:\.\d{1,2})+\.\s+[A-Z]{2}[A-Z/&,'()-]*(?:\s+[A-Z/&,'()-]+)*[.:]?(?:\s|$)";

/// Heading conventions and post-processing pipeline of one document family.
#[derive(Debug, Clone)]
pub struct DocumentFamilyRules {
    pub family: DocumentFamily,
    numbered_heading: Regex,
    dotted_heading: Option<Regex>,
    fixed_title: Regex,
    labels: Vec<(SectionLabel, Vec<Regex>)>,
    bold_headings: bool,
    passes: Vec<Pass>,
}

impl DocumentFamilyRules {
    /// Rules with no labels and the default pipeline. `numbered_heading`
    /// must capture the heading number in group 1.
    pub fn new(family: DocumentFamily, numbered_heading: Regex, fixed_title: Regex) -> Self {
        Self {
            family,
            numbered_heading,
            dotted_heading: None,
            fixed_title,
            labels: Vec::new(),
            bold_headings: false,
            passes: Pass::DEFAULT_PIPELINE.to_vec(),
        }
    }

    pub fn with_dotted_heading(mut self, pattern: Regex) -> Self {
        self.dotted_heading = Some(pattern);
        self
    }

    /// Register a heading pattern for `label`. Labels are consulted in the
    /// order they were first registered.
    pub fn with_label(mut self, label: SectionLabel, pattern: Regex) -> Self {
        match self.labels.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, patterns)) => patterns.push(pattern),
            None => self.labels.push((label, vec![pattern])),
        }
        self
    }

    pub fn with_bold_headings(mut self, enabled: bool) -> Self {
        self.bold_headings = enabled;
        self
    }

    pub fn with_passes(mut self, passes: &[Pass]) -> Self {
        self.passes = passes.to_vec();
        self
    }

    /// Number of a top-level numbered heading (`1. PURPOSE.`).
    pub fn numbered_heading_number(&self, text: &str) -> Option<u32> {
        self.numbered_heading
            .captures(text)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    }

    /// A dotted heading such as `1.1. APPLICABILITY.`
    pub fn is_dotted_heading(&self, text: &str) -> bool {
        self.dotted_heading
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }

    /// An unnumbered title that always opens a section (`REFERENCES`).
    pub fn is_fixed_title(&self, text: &str) -> bool {
        self.fixed_title.is_match(text)
    }

    pub fn bold_headings(&self) -> bool {
        self.bold_headings
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn label_patterns(&self, label: SectionLabel) -> &[Regex] {
        self.labels
            .iter()
            .find(|(existing, _)| *existing == label)
            .map(|(_, patterns)| patterns.as_slice())
            .unwrap_or(&[])
    }

    pub fn matches_label(&self, label: SectionLabel, line: &str) -> bool {
        self.label_patterns(label)
            .iter()
            .any(|pattern| pattern.is_match(line))
    }

    /// Labels in the order used to classify a section heading.
    pub fn heading_priority(&self) -> impl Iterator<Item = SectionLabel> + '_ {
        self.labels.iter().map(|(label, _)| *label)
    }
}

impl DocumentFamily {
    /// The shared, read-only rules for this family.
    pub fn rules(self) -> &'static DocumentFamilyRules {
        match self {
            DocumentFamily::Dod => &DOD_RULES,
            DocumentFamily::Cjcs => &CJCS_RULES,
            DocumentFamily::Navy => &NAVY_RULES,
            DocumentFamily::Generic => &GENERIC_RULES,
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

static DOD_RULES: Lazy<DocumentFamilyRules> = Lazy::new(|| {
    use SectionLabel::*;

    DocumentFamilyRules::new(
        DocumentFamily::Dod,
        re(UPPER_NUMBERED_HEADING),
        re(r"^\s*(?:REFERENCES|RESPONSIBILITIES|PROCEDURES|GLOSSARY|SUMMARY OF CHANGES?(?:\s+\d{1,2})?|TABLE OF CONTENTS|ENCLOSURES?|APPENDIX\s+[A-Z0-9]{1,2}(?:\s*[:.-].*)?|SECTION\s+\d{1,2}\s*[:.].*)\s*$"),
    )
    .with_dotted_heading(re(UPPER_DOTTED_HEADING))
    .with_label(TableOfContents, re(r"(?i)^\s*table\s+of\s+contents\b"))
    .with_label(Subject, re(r"^\s*(?:SUBJECT|Subject):"))
    .with_label(Purpose, re(r"^\s*(?:\d{1,2}\.\s+)?PURPOSE\b"))
    .with_label(Applicability, re(r"^\s*(?:\d{1,2}(?:\.\d{1,2})*\.\s+)?APPLICABILITY\b"))
    .with_label(Authorities, re(r"^\s*(?:\d{1,2}(?:\.\d{1,2})*\.\s+)?AUTHORIT(?:Y|IES)\b"))
    .with_label(Policy, re(r"^\s*(?:\d{1,2}(?:\.\d{1,2})*\.\s+)?POLICY\b"))
    .with_label(
        Responsibilities,
        re(r"^\s*(?:\d{1,2}\.\s+|SECTION\s+\d{1,2}\s*[:.]\s*)?RESPONSIBILITIES\b"),
    )
    .with_label(
        Procedures,
        re(r"^\s*(?:\d{1,2}\.\s+|SECTION\s+\d{1,2}\s*[:.]\s*)?PROCEDURES\b"),
    )
    .with_label(
        Organizations,
        re(r"^\s*(?:\d{1,2}\.\s+)?(?:ORGANIZATION AND MANAGEMENT|ORGANIZATIONS?|RELATIONSHIPS)\b"),
    )
    .with_label(SummaryOfChange, re(r"^\s*(?:\d{1,2}\.\s+)?SUMMARY\s+OF\s+CHANGES?\b"))
    .with_label(References, re(r"^\s*(?:\d{1,2}\.\s+)?REFERENCES\b"))
    .with_label(
        Definitions,
        re(r"^\s*(?:\d{1,2}(?:\.\d{1,2})*\.\s+|G\.\d{1,2}\.\s+|PART\s+II\.?\s*(?:-{1,2}|:)?\s*)?(?:DEFINITIONS|TERMS)\b"),
    )
    .with_label(Glossary, re(r"^\s*GLOSSARY\b"))
    .with_label(Enclosures, re(r"^\s*(?:E\d{1,2}\.\s*)?ENCLOSURE\s+\d{1,2}\b"))
    .with_passes(&[
        Pass::RemovePagebreaksAndNoise,
        Pass::CombineToc,
        Pass::CombineAlphaListItems,
        Pass::CombineSectionNums,
        Pass::CombineBySectionNums,
        Pass::CombineEnclosuresList,
        Pass::CombineEnclosures,
        Pass::CombineGlossaryThenReferences,
        Pass::RemoveRepeatedSectionTitles,
    ])
});

static CJCS_RULES: Lazy<DocumentFamilyRules> = Lazy::new(|| {
    use SectionLabel::*;

    DocumentFamilyRules::new(
        DocumentFamily::Cjcs,
        re(TITLE_CASE_NUMBERED_HEADING),
        re(r"^\s*(?:REFERENCES|RESPONSIBILITIES|PROCEDURES|GLOSSARY|TABLE OF CONTENTS|PART\s+[IV]{1,3}\b.*|APPENDIX\s+[A-Z0-9]{1,2}\s+TO\s+ENCLOSURE\s+[A-Z]\b.*)\s*$"),
    )
    .with_label(TableOfContents, re(r"(?i)^\s*table\s+of\s+contents\b"))
    .with_label(Subject, re(r"^\s*(?:SUBJECT|Subject):"))
    .with_label(Purpose, NUMBERED_PURPOSE_START_PATTERN.clone())
    .with_label(Applicability, re(r"^\s*\d{1,2}\.\s+Applicability\b"))
    .with_label(Authorities, re(r"^\s*\d{1,2}\.\s+Authorit(?:y|ies)\b"))
    .with_label(Policy, re(r"^\s*\d{1,2}\.\s+Policy\b"))
    .with_label(Responsibilities, NUMBERED_RESPONSIBILITIES_START_PATTERN.clone())
    .with_label(Responsibilities, re(r"^\s*RESPONSIBILITIES\b"))
    .with_label(Procedures, re(r"^\s*(?:\d{1,2}\.\s+Procedures\b|PROCEDURES\b)"))
    .with_label(Organizations, re(r"^\s*\d{1,2}\.\s+Organizations?\b"))
    .with_label(SummaryOfChange, re(r"^\s*\d{1,2}\.\s+Summary\s+of\s+Changes?\b"))
    .with_label(References, re(r"^\s*(?:REFERENCES\b|\d{1,2}\.\s+References\b)"))
    .with_label(
        Definitions,
        re(r"^\s*(?:\d{1,2}\.\s+Definitions\b|PART\s+II\.?\s*(?:-{1,2}|:)?\s*DEFINITIONS\b)"),
    )
    .with_label(Glossary, re(r"^\s*GLOSSARY\b"))
    .with_label(Enclosures, re(r"^\s*ENCLOSURE\s+[A-Z]\b"))
    .with_passes(&[
        Pass::RemovePagebreaksAndNoise,
        Pass::CombineToc,
        Pass::CombineAlphaListItems,
        Pass::CombineBySectionNums,
        Pass::CombineEnclosures,
        Pass::CombineGlossary,
        Pass::RemoveRepeatedSectionTitles,
    ])
});

static NAVY_RULES: Lazy<DocumentFamilyRules> = Lazy::new(|| {
    use SectionLabel::*;

    DocumentFamilyRules::new(
        DocumentFamily::Navy,
        re(TITLE_CASE_NUMBERED_HEADING),
        re(r"^\s*(?:(?:Subj(?:ect)?|Ref|Encl)\s*:|GLOSSARY\b|TABLE OF CONTENTS\b)"),
    )
    .with_label(TableOfContents, re(r"(?i)^\s*table\s+of\s+contents\b"))
    .with_label(Subject, re(r"^\s*Subj(?:ect)?:"))
    .with_label(Purpose, re(r"^\s*\d{1,2}\.\s+Purpose\b"))
    .with_label(Applicability, re(r"^\s*\d{1,2}\.\s+(?:Applicability|Scope)\b"))
    .with_label(Authorities, re(r"^\s*\d{1,2}\.\s+Authorit(?:y|ies)\b"))
    .with_label(Policy, re(r"^\s*\d{1,2}\.\s+Policy\b"))
    .with_label(Responsibilities, re(r"^\s*\d{1,2}\.\s+(?:Responsibilities|Action)\b"))
    .with_label(Procedures, re(r"^\s*\d{1,2}\.\s+Procedures\b"))
    .with_label(Organizations, re(r"^\s*\d{1,2}\.\s+Organizations?\b"))
    .with_label(SummaryOfChange, re(r"^\s*\d{1,2}\.\s+Summary\s+of\s+Changes?\b"))
    .with_label(References, re(r"^\s*(?:Ref(?:erences?)?\s*:|\d{1,2}\.\s+References\b)"))
    .with_label(Definitions, re(r"^\s*\d{1,2}\.\s+Definitions\b"))
    .with_label(Glossary, re(r"(?i)^\s*glossary\b"))
    .with_label(Enclosures, re(r"^\s*Encl(?:osures?)?\s*:"))
    .with_passes(&[
        Pass::RemovePagebreaksAndNoise,
        Pass::CombineToc,
        Pass::CombineAlphaListItems,
        Pass::CombineBySectionNums,
        Pass::CombineEnclosures,
        Pass::RemoveRepeatedSectionTitles,
    ])
});

fn generic_label(keywords: &str) -> Regex {
    re(&format!(
        r"(?i)^\s*(?:(?:\d{{1,2}}(?:\.\d{{1,2}})*\.?|section\s+\d{{1,2}}\s*[:.]?|[IVX]{{1,4}}\.)\s+)?(?:{keywords})\b"
    ))
}

static GENERIC_RULES: Lazy<DocumentFamilyRules> = Lazy::new(|| {
    use SectionLabel::*;

    DocumentFamilyRules::new(
        DocumentFamily::Generic,
        re(r"^\s*(\d{1,2})\.\s+[A-Z][A-Za-z()'/&-]*(?:\s+[A-Za-z()'/&-]+){0,6}[.:]?\s*$"),
        re(r"(?i)^\s*(?:references|responsibilities|procedures|glossary|table of contents|definitions|purpose|policy|applicability)\s*:?\s*$"),
    )
    .with_dotted_heading(re(UPPER_DOTTED_HEADING))
    .with_bold_headings(true)
    .with_label(TableOfContents, generic_label(r"table\s+of\s+contents"))
    .with_label(Subject, re(r"(?i)^\s*subj(?:ect)?:"))
    .with_label(Purpose, generic_label("purpose"))
    .with_label(Applicability, generic_label("applicability|scope"))
    .with_label(Authorities, generic_label("authority|authorities"))
    .with_label(Policy, generic_label("policy"))
    .with_label(Responsibilities, generic_label("responsibilities"))
    .with_label(Procedures, generic_label("procedures"))
    .with_label(Organizations, generic_label("organizations?|organization and management"))
    .with_label(SummaryOfChange, generic_label(r"summary\s+of\s+changes?"))
    .with_label(References, generic_label("references"))
    .with_label(Definitions, generic_label("definitions"))
    .with_label(Glossary, generic_label("glossary"))
    .with_label(Enclosures, re(r"(?i)^\s*(?:E\d{1,2}\.\s*)?enclosure\s+(?:\d{1,2}|[A-Z])\b"))
    .with_passes(&[
        Pass::RemovePagebreaksAndNoise,
        Pass::CombineToc,
        Pass::CombineAlphaListItems,
        Pass::CombineSectionNums,
        Pass::CombineBySectionNums,
        Pass::CombineEnclosures,
        Pass::CombineGlossary,
        Pass::RemoveRepeatedSectionTitles,
    ])
});
