//! CV quality analysis.
//!
//! A fixed catalog of checks evaluated over a `CvDocument`, in catalog
//! order, every run. `analyze` is a pure function: identical input yields
//! an identical issue list (same ids, severities, order). It never fails;
//! a document with every optional field absent simply reports more issues.
//!
//! Marking an issue fixed, and promoting the overall bucket as issues get
//! fixed, is session state owned by the consumer. The engine always emits
//! `is_fixed: false` and `Satisfactory` for the current snapshot.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::ExtractionPolicy;
use crate::extraction::fields::{EMAIL_RE, PHONE_RE};
use crate::models::cv::CvDocument;

/// Priority of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Urgent,
    Critical,
    Optional,
}

/// Coarse overall rating. A fresh analysis always reports `Satisfactory`;
/// the session layer may promote it as the user resolves issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreBucket {
    Satisfactory,
    Good,
    Excellent,
}

/// A single detected quality problem, with a remediation suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisIssue {
    pub id: String,
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    pub is_fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub issues: Vec<AnalysisIssue>,
    pub overall_score_bucket: ScoreBucket,
}

/// Phrases that mark a summary as boilerplate regardless of length.
const GENERIC_PHRASES: &[&str] = &[
    "hard-working",
    "hardworking",
    "team player",
    "results-driven",
    "detail-oriented",
    "self-starter",
    "go-getter",
    "responsible for",
];

/// A summary shorter than this is treated as non-specific.
const SUMMARY_MIN_CHARS: usize = 120;

/// Keywords whose presence counts as a skills section in raw extracted text.
const SKILLS_KEYWORDS: &[&str] = &["skills", "competencies", "technologies"];

/// International `+1 (xxx) xxx-xxxx`-style form.
static INTL_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{1,3} \(\d{3}\) \d{3}-\d{4}$").unwrap());

/// Evaluates the full check catalog against a CV document.
///
/// Baseline checks always run against the structured fields; the four
/// upload checks run only when the document carries extracted text from an
/// uploaded file, and inspect that raw text instead.
pub fn analyze(doc: &CvDocument, policy: &ExtractionPolicy) -> AnalysisReport {
    let mut issues = Vec::new();

    // Baseline catalog, in fixed order.
    if doc.personal_info.linkedin_url.trim().is_empty() {
        issues.push(issue(
            "linkedin-missing",
            "personalInfo",
            Some("linkedinUrl"),
            Severity::Urgent,
            "LinkedIn profile missing",
            "No LinkedIn URL is set on the CV.",
            "Add a link to your LinkedIn profile; most recruiters check it first.",
        ));
    }

    let summary = doc.professional_summary.trim();
    if !summary.is_empty() && is_generic_summary(summary) {
        issues.push(issue(
            "generic-summary",
            "professionalSummary",
            None,
            Severity::Critical,
            "Professional summary is too generic",
            "The summary reads as boilerplate and does not say what you specifically deliver.",
            "Rewrite the summary around your specialty, years of experience, and one or two concrete achievements.",
        ));
    }

    if !doc.employment_history.is_empty()
        && !doc
            .employment_history
            .iter()
            .any(|entry| has_quantified_metrics(&entry.description))
    {
        issues.push(issue(
            "unquantified-experience",
            "employmentHistory",
            None,
            Severity::Critical,
            "Experience lacks measurable impact",
            "No employment entry mentions a number, percentage, or amount.",
            "Add concrete figures to your role descriptions, e.g. 'reduced latency by 40%' or 'served 2M users'.",
        ));
    }

    let phone = doc.personal_info.phone.trim();
    if !phone.is_empty() && !INTL_PHONE_RE.is_match(phone) {
        issues.push(issue(
            "phone-formatting",
            "personalInfo",
            Some("phone"),
            Severity::Optional,
            "Phone number is not in international format",
            "The phone number is readable but not in the '+1 (555) 123-4567' style.",
            "Format the number with a country code so international recruiters can dial it directly.",
        ));
    }

    // Upload catalog: only when extracted text is present, and evaluated
    // against that raw text rather than the structured fields.
    if let Some(file) = &doc.uploaded_file {
        let text = &file.extracted_text;

        if text.chars().count() < policy.brief_content_chars {
            issues.push(issue(
                "content-too-brief",
                "uploadedFile",
                None,
                Severity::Critical,
                "CV content is too brief",
                "Very little text could be read from the uploaded file.",
                "Expand the CV, or rebuild it in the CV builder if the upload lost content.",
            ));
        }

        if !EMAIL_RE.is_match(text) {
            issues.push(issue(
                "email-not-found",
                "uploadedFile",
                None,
                Severity::Urgent,
                "No email address found",
                "The uploaded CV does not contain a recognizable email address.",
                "Add your email address near the top of the CV.",
            ));
        }

        if !PHONE_RE.is_match(text) {
            issues.push(issue(
                "phone-not-found",
                "uploadedFile",
                None,
                Severity::Critical,
                "No phone number found",
                "The uploaded CV does not contain a recognizable phone number.",
                "Add a phone number so recruiters can reach you directly.",
            ));
        }

        let lower = text.to_lowercase();
        if !SKILLS_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            issues.push(issue(
                "skills-section-missing",
                "uploadedFile",
                None,
                Severity::Critical,
                "No skills section found",
                "The uploaded CV has no skills, competencies, or technologies section.",
                "Add a dedicated skills section listing the tools and technologies you work with.",
            ));
        }
    }

    AnalysisReport {
        issues,
        overall_score_bucket: ScoreBucket::Satisfactory,
    }
}

/// Below a minimum length, or leaning on boilerplate phrases, the summary
/// says nothing specific about the candidate.
fn is_generic_summary(summary: &str) -> bool {
    if summary.chars().count() < SUMMARY_MIN_CHARS {
        return true;
    }
    let lower = summary.to_lowercase();
    GENERIC_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// A description counts as quantified when it carries a digit, percentage,
/// or currency amount.
fn has_quantified_metrics(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£')
}

fn issue(
    id: &str,
    section: &str,
    field: Option<&str>,
    severity: Severity,
    title: &str,
    description: &str,
    suggestion: &str,
) -> AnalysisIssue {
    AnalysisIssue {
        id: id.to_string(),
        section: section.to_string(),
        field: field.map(str::to_string),
        severity,
        title: title.to_string(),
        description: description.to_string(),
        suggestion: suggestion.to_string(),
        is_fixed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{CvPersonalInfo, EmploymentEntry, UploadedFileInfo};
    use chrono::Utc;

    fn policy() -> ExtractionPolicy {
        ExtractionPolicy::default()
    }

    fn strong_summary() -> String {
        "Systems engineer with 11 years building storage and streaming infrastructure; \
         led the migration of a 40-node cluster and cut p99 latency by 35%."
            .to_string()
    }

    fn complete_document() -> CvDocument {
        CvDocument {
            personal_info: CvPersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+1 (415) 555-1234".to_string(),
                linkedin_url: "https://linkedin.com/in/janedoe".to_string(),
                github_url: "https://github.com/janedoe".to_string(),
            },
            professional_summary: strong_summary(),
            employment_history: vec![EmploymentEntry {
                job_title: "Staff Engineer".to_string(),
                employer: "Acme".to_string(),
                start_date: Some("2019-01".to_string()),
                end_date: None,
                description: "Scaled ingestion to 2M events/sec, cutting cost by 30%".to_string(),
            }],
            education: vec![],
            uploaded_file: None,
        }
    }

    fn uploaded(text: &str) -> UploadedFileInfo {
        UploadedFileInfo {
            file_name: "cv.pdf".to_string(),
            extracted_text: text.to_string(),
            file_size: text.len() as u64,
            file_type: "pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    fn ids(report: &AnalysisReport) -> Vec<&str> {
        report.issues.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_complete_document_has_no_issues() {
        let report = analyze(&complete_document(), &policy());
        assert!(report.issues.is_empty(), "unexpected: {:?}", ids(&report));
        assert_eq!(report.overall_score_bucket, ScoreBucket::Satisfactory);
    }

    #[test]
    fn test_deterministic() {
        let mut doc = complete_document();
        doc.personal_info.linkedin_url.clear();
        doc.professional_summary = "Team player.".to_string();
        let first = analyze(&doc, &policy());
        let second = analyze(&doc, &policy());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_linkedin_is_urgent() {
        let mut doc = complete_document();
        doc.personal_info.linkedin_url = "  ".to_string();
        let report = analyze(&doc, &policy());
        let issue = report
            .issues
            .iter()
            .find(|i| i.id == "linkedin-missing")
            .expect("linkedin issue");
        assert_eq!(issue.severity, Severity::Urgent);
        assert_eq!(issue.field.as_deref(), Some("linkedinUrl"));
    }

    #[test]
    fn test_short_summary_is_generic() {
        let mut doc = complete_document();
        doc.professional_summary = "Engineer with experience.".to_string();
        let report = analyze(&doc, &policy());
        assert!(ids(&report).contains(&"generic-summary"));
    }

    #[test]
    fn test_boilerplate_summary_is_generic_despite_length() {
        let mut doc = complete_document();
        doc.professional_summary = format!("{} A results-driven team player.", strong_summary());
        let report = analyze(&doc, &policy());
        assert!(ids(&report).contains(&"generic-summary"));
    }

    #[test]
    fn test_absent_summary_is_not_flagged_generic() {
        let mut doc = complete_document();
        doc.professional_summary.clear();
        let report = analyze(&doc, &policy());
        assert!(!ids(&report).contains(&"generic-summary"));
    }

    #[test]
    fn test_unquantified_experience() {
        let mut doc = complete_document();
        doc.employment_history[0].description =
            "Worked on backend services and improved reliability".to_string();
        let report = analyze(&doc, &policy());
        let issue = report
            .issues
            .iter()
            .find(|i| i.id == "unquantified-experience")
            .expect("experience issue");
        assert_eq!(issue.severity, Severity::Critical);
    }

    #[test]
    fn test_one_quantified_entry_satisfies_the_check() {
        let mut doc = complete_document();
        doc.employment_history.push(EmploymentEntry {
            description: "Maintained internal tools".to_string(),
            ..Default::default()
        });
        let report = analyze(&doc, &policy());
        assert!(!ids(&report).contains(&"unquantified-experience"));
    }

    #[test]
    fn test_empty_history_is_not_flagged() {
        let mut doc = complete_document();
        doc.employment_history.clear();
        let report = analyze(&doc, &policy());
        assert!(!ids(&report).contains(&"unquantified-experience"));
    }

    #[test]
    fn test_phone_formatting_is_optional_severity() {
        let mut doc = complete_document();
        doc.personal_info.phone = "415-555-1234".to_string();
        let report = analyze(&doc, &policy());
        let issue = report
            .issues
            .iter()
            .find(|i| i.id == "phone-formatting")
            .expect("phone issue");
        assert_eq!(issue.severity, Severity::Optional);
    }

    #[test]
    fn test_brief_extract_is_critical() {
        let mut doc = complete_document();
        doc.uploaded_file = Some(uploaded(&"x".repeat(40)));
        let report = analyze(&doc, &policy());
        let issue = report
            .issues
            .iter()
            .find(|i| i.id == "content-too-brief")
            .expect("brief issue");
        assert_eq!(issue.severity, Severity::Critical);
        assert_eq!(issue.section, "uploadedFile");
    }

    #[test]
    fn test_upload_checks_inspect_raw_text() {
        // Structured fields are complete, but the raw extract is missing
        // contact details; the upload checks must still fire.
        let mut doc = complete_document();
        let body = "word ".repeat(120);
        doc.uploaded_file = Some(uploaded(&body));
        let report = analyze(&doc, &policy());
        let found = ids(&report);
        assert!(found.contains(&"email-not-found"));
        assert!(found.contains(&"phone-not-found"));
        assert!(found.contains(&"skills-section-missing"));
    }

    #[test]
    fn test_clean_upload_reports_no_upload_issues() {
        let mut doc = complete_document();
        let body = format!(
            "Jane Doe jane@example.com 415-555-1234 Technologies: Rust, SQL. {}",
            "More body text. ".repeat(40)
        );
        doc.uploaded_file = Some(uploaded(&body));
        let report = analyze(&doc, &policy());
        for id in [
            "content-too-brief",
            "email-not-found",
            "phone-not-found",
            "skills-section-missing",
        ] {
            assert!(!ids(&report).contains(&id), "unexpected {id}");
        }
    }

    #[test]
    fn test_no_upload_checks_without_uploaded_file() {
        let mut doc = complete_document();
        doc.personal_info.linkedin_url.clear();
        let report = analyze(&doc, &policy());
        assert!(report.issues.iter().all(|i| i.section != "uploadedFile"));
    }

    #[test]
    fn test_issue_order_follows_catalog() {
        let doc = CvDocument {
            professional_summary: "Team player.".to_string(),
            employment_history: vec![EmploymentEntry {
                description: "Did things".to_string(),
                ..Default::default()
            }],
            personal_info: CvPersonalInfo {
                phone: "5551234567".to_string(),
                ..Default::default()
            },
            uploaded_file: Some(uploaded("short")),
            ..Default::default()
        };
        let report = analyze(&doc, &policy());
        assert_eq!(
            ids(&report),
            vec![
                "linkedin-missing",
                "generic-summary",
                "unquantified-experience",
                "phone-formatting",
                "content-too-brief",
                "email-not-found",
                "phone-not-found",
                "skills-section-missing",
            ]
        );
    }

    #[test]
    fn test_issues_are_never_prefixed_fixed() {
        let doc = CvDocument::default();
        let report = analyze(&doc, &policy());
        assert!(!report.issues.is_empty());
        assert!(report.issues.iter().all(|i| !i.is_fixed));
    }

    #[test]
    fn test_severity_wire_format() {
        assert_eq!(serde_json::to_value(Severity::Urgent).unwrap(), "urgent");
        assert_eq!(
            serde_json::to_value(ScoreBucket::Satisfactory).unwrap(),
            "SATISFACTORY"
        );
    }
}
