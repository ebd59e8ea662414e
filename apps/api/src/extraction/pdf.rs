//! Heuristic PDF text recovery.
//!
//! This is deliberately not a compliant PDF parser. Simple, non-flowed PDFs
//! place literal text directly adjacent to the show-text operators, so
//! scanning the raw stream for parenthesized literals and `BT … ET` text
//! objects recovers readable content without a content-stream tokenizer.
//! Compressed content streams yield no text; callers see that as an
//! `Extraction` failure rather than garbage.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::ExtractionPolicy;
use crate::errors::AppError;
use crate::extraction::sanitize::sanitize_text;

/// Any parenthesized literal, the string form used by `Tj`/`TJ`.
static LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

/// A `BT … ET` text object.
static TEXT_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)BT(.*?)ET").unwrap());

/// A literal immediately followed by the `Tj` show-text operator.
static SHOW_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]*)\)\s*Tj").unwrap());

/// Recovers a best-effort plain-text rendering of a PDF byte stream.
///
/// Fails with `AppError::Extraction` when the sanitized result is shorter
/// than the configured minimum.
pub fn extract_pdf_text(bytes: &[u8], policy: &ExtractionPolicy) -> Result<String, AppError> {
    // Latin-1 decode: 1:1 byte-to-character mapping, so the regexes above
    // run over binary content without corrupting offsets.
    let decoded = decode_latin1(bytes);

    let loose = recover_loose_text(&decoded);
    let structured = recover_structured_text(&decoded);

    let text = sanitize_text(&format!("{loose} {structured}"));

    if text.chars().count() < policy.min_extracted_chars {
        return Err(AppError::Extraction(
            "insufficient text recovered; the PDF may be image-based or use a non-standard encoding"
                .to_string(),
        ));
    }

    Ok(text)
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Every parenthesized literal in the stream, keeping only those that look
/// like text: longer than one character and containing at least one Latin
/// letter. Filters out the coordinate and operand noise that also appears
/// in parentheses.
fn recover_loose_text(decoded: &str) -> String {
    LITERAL_RE
        .captures_iter(decoded)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter(|s| s.len() > 1 && s.chars().any(|c| c.is_ascii_alphabetic()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Literals shown via `Tj` inside `BT … ET` text objects.
fn recover_structured_text(decoded: &str) -> String {
    TEXT_OBJECT_RE
        .captures_iter(decoded)
        .filter_map(|block| block.get(1))
        .map(|body| {
            SHOW_TEXT_RE
                .captures_iter(body.as_str())
                .filter_map(|cap| cap.get(1))
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ExtractionPolicy {
        ExtractionPolicy::default()
    }

    /// A minimal text-only PDF body: literals adjacent to show-text
    /// operators, padded with enough content to clear the length gate.
    fn synthetic_pdf(extra_literals: &[&str]) -> Vec<u8> {
        let mut doc = String::from("%PDF-1.4\n1 0 obj\nstream\nBT /F1 12 Tf (Hello World) Tj ET\n");
        for lit in extra_literals {
            doc.push_str(&format!("BT ({lit}) Tj ET\n"));
        }
        doc.push_str("endstream\n%%EOF");
        doc.into_bytes()
    }

    #[test]
    fn test_round_trip_hello_world() {
        let bytes = synthetic_pdf(&[
            "Jane Doe, Senior Systems Engineer",
            "Ten years of experience building infrastructure",
        ]);
        let text = extract_pdf_text(&bytes, &policy()).unwrap();
        assert!(text.contains("Hello World"));
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn test_insufficient_text_fails() {
        let bytes = b"%PDF-1.4\nBT (Hi) Tj ET\n%%EOF";
        let err = extract_pdf_text(bytes, &policy()).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_number_literals_are_filtered() {
        // Coordinate noise in parentheses carries no letters and is dropped.
        let mut doc = String::from("(123 456) (7.5) ");
        doc.push_str("BT (Curriculum vitae of a well travelled candidate engineer) Tj ET");
        let text = extract_pdf_text(doc.as_bytes(), &policy()).unwrap();
        assert!(!text.contains("123 456"));
        assert!(!text.contains("7.5"));
        assert!(text.contains("Curriculum vitae"));
    }

    #[test]
    fn test_binary_noise_is_tolerated() {
        let mut bytes = synthetic_pdf(&["Plenty of additional resume body text goes here"]);
        bytes.extend_from_slice(&[0x00, 0xff, 0xfe, 0x80, 0x9c]);
        bytes.extend_from_slice(b" (more trailing words) ");
        let text = extract_pdf_text(&bytes, &policy()).unwrap();
        assert!(text.contains("more trailing words"));
        // Sanitization holds even over raw binary input.
        assert!(!text.contains('\u{0}'));
    }

    #[test]
    fn test_loose_literals_outside_text_objects_are_kept() {
        let doc = "(Standalone text fragment recovered without any operators nearby at all)";
        let text = extract_pdf_text(doc.as_bytes(), &policy()).unwrap();
        assert!(text.contains("Standalone text fragment"));
    }

    #[test]
    fn test_compressed_stream_yields_nothing() {
        // A FlateDecode stream has no readable literals; the gate rejects it.
        let mut bytes = b"%PDF-1.7\n<< /Filter /FlateDecode >>\nstream\n".to_vec();
        bytes.extend((0u8..=255).cycle().take(2048));
        bytes.extend_from_slice(b"\nendstream");
        assert!(extract_pdf_text(&bytes, &policy()).is_err());
    }
}
