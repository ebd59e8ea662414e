//! Heuristic Word text recovery.
//!
//! Neither the OOXML zip container nor the legacy Compound File Binary
//! structure is parsed. Readable fragments survive as contiguous ASCII runs
//! inside both formats often enough to clear the minimum-length gate, and
//! that is all this path relies on. Accuracy is lower than the PDF path.

use crate::config::ExtractionPolicy;
use crate::errors::AppError;
use crate::extraction::sanitize::sanitize_text;

/// Recovers readable text from a Word (`.doc`/`.docx`) byte stream.
///
/// Fails with `AppError::Extraction` when the sanitized result is shorter
/// than the configured minimum.
pub fn extract_word_text(bytes: &[u8], policy: &ExtractionPolicy) -> Result<String, AppError> {
    // Lossy decode: malformed sequences become replacement characters
    // instead of aborting, and are scrubbed in the next step.
    let decoded = String::from_utf8_lossy(bytes);

    let scrubbed: String = decoded
        .chars()
        .map(|c| if is_printable(c) { c } else { ' ' })
        .collect();

    // Collapse whitespace runs to single spaces.
    let collapsed = scrubbed.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = sanitize_text(&collapsed);

    if text.chars().count() < policy.min_extracted_chars {
        return Err(AppError::Extraction(
            "insufficient text recovered; the document may be empty or heavily formatted"
                .to_string(),
        ));
    }

    Ok(text)
}

fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~') || matches!(c, '\n' | '\r' | '\t')
}
