//! Structured field extraction over sanitized free text.
//!
//! Everything here is best-effort pattern matching: absent fields are
//! `None`, never empty strings, and no input can make extraction fail.
//!
//! Section segmentation works from an ordered table of header patterns.
//! All header match positions are computed in one pass and each span
//! between consecutive headers is assigned to the label of its preceding
//! header, so no pattern has to enumerate the other labels' keywords in a
//! lookahead. A body word that coincidentally matches a header keyword can
//! still truncate a section; that is the accepted cost of regex-based
//! layout inference.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::extraction::sanitize::sanitize_text;

/// Standard `local@domain.tld` shape, ASCII only.
pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// North-American-style number: optional `+1`, optional parenthesized area
/// code, `-`/`.`/space separators between the 3-3-4 digit groups.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+1[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}").unwrap());

/// Contact identity recovered from extracted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Named zones segmented out of the extracted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl ExtractedSections {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.experience.is_none()
            && self.education.is_none()
            && self.skills.is_none()
    }
}

/// Combined output of a field-extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub personal_info: Option<PersonalInfo>,
    pub sections: Option<ExtractedSections>,
}

/// Runs all matchers over sanitized text. Total: any input yields a result,
/// with aggregates omitted entirely when nothing inside them matched.
pub fn extract_fields(text: &str) -> ExtractedFields {
    let personal = PersonalInfo {
        name: detect_name(text),
        email: find_email(text),
        phone: find_phone(text),
    };

    let sections = segment_sections(text);

    ExtractedFields {
        personal_info: (!personal.is_empty()).then_some(personal),
        sections: (!sections.is_empty()).then_some(sections),
    }
}

pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Name detection
// ────────────────────────────────────────────────────────────────────────────

type NameDetector = fn(&str) -> Option<String>;

/// Detection strategies tried in order; first success wins. Kept as an
/// explicit chain so a new strategy (e.g. a `Name: …` label matcher) is an
/// entry here rather than an edit to a monolithic condition.
const NAME_DETECTORS: &[NameDetector] = &[name_from_leading_lines];

/// Characters that disqualify a line from being a name. Periods are allowed
/// so middle initials survive.
const NAME_SYMBOLS: &[char] = &[
    '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '=', '[', ']', '{', '}', '|', '\\',
    ':', ';', '"', '\'', '<', '>', '?', ',', '/',
];

fn detect_name(text: &str) -> Option<String> {
    NAME_DETECTORS.iter().find_map(|detect| detect(text))
}

/// The first of the first five non-blank lines that has 2–4 tokens and no
/// symbol characters.
fn name_from_leading_lines(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(5)
        .find(|line| {
            let tokens = line.split_whitespace().count();
            (2..=4).contains(&tokens) && !line.contains(NAME_SYMBOLS)
        })
        .map(str::to_string)
}

// ────────────────────────────────────────────────────────────────────────────
// Section segmentation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionLabel {
    Summary,
    Experience,
    Education,
    Skills,
}

/// Ordered header table. Longer alternatives come first inside each pattern
/// so the leftmost-first alternation picks the full phrase.
static SECTION_HEADERS: LazyLock<Vec<(SectionLabel, Regex)>> = LazyLock::new(|| {
    let header = |alts: &str| Regex::new(&format!(r"(?i)\b(?:{alts})\b\s*:?\s*")).unwrap();
    vec![
        (
            SectionLabel::Summary,
            header(r"professional\s+summary|career\s+summary|about\s+me|summary|profile|objective|about|overview"),
        ),
        (
            SectionLabel::Experience,
            header(r"work\s+experience|professional\s+experience|employment\s+history|work\s+history|experience"),
        ),
        (
            SectionLabel::Education,
            header(r"academic\s+background|education|qualifications"),
        ),
        (
            SectionLabel::Skills,
            header(r"technical\s+skills|core\s+competencies|skills|competencies|technologies|expertise"),
        ),
    ]
});

struct HeaderHit {
    label: SectionLabel,
    start: usize,
    body_start: usize,
}

fn segment_sections(text: &str) -> ExtractedSections {
    let mut hits: Vec<HeaderHit> = Vec::new();
    for (label, pattern) in SECTION_HEADERS.iter() {
        for m in pattern.find_iter(text) {
            hits.push(HeaderHit {
                label: *label,
                start: m.start(),
                body_start: m.end(),
            });
        }
    }
    hits.sort_by_key(|h| (h.start, h.body_start));

    // Drop headers that begin inside the previous header's matched range
    // (e.g. "summary" inside "professional summary" found by another label).
    let mut kept: Vec<HeaderHit> = Vec::new();
    for hit in hits {
        if kept.last().map_or(true, |prev| hit.start >= prev.body_start) {
            kept.push(hit);
        }
    }

    let mut sections = ExtractedSections::default();
    for (i, hit) in kept.iter().enumerate() {
        let end = kept.get(i + 1).map_or(text.len(), |next| next.start);
        let body = sanitize_text(&text[hit.body_start..end]);
        if body.is_empty() {
            continue;
        }
        let slot = match hit.label {
            SectionLabel::Summary => &mut sections.summary,
            SectionLabel::Experience => &mut sections.experience,
            SectionLabel::Education => &mut sections.education,
            SectionLabel::Skills => &mut sections.skills,
        };
        // First occurrence of a label wins.
        if slot.is_none() {
            *slot = Some(body);
        }
    }
    sections
}
