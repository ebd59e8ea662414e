//! Control-character sanitization applied to every extracted string before
//! it reaches regex matching or the response body.

/// Strips NUL and all other control characters except `\n`, `\r`, `\t`,
/// then trims surrounding whitespace.
///
/// Idempotent: `sanitize_text(sanitize_text(s)) == sanitize_text(s)`.
/// Never fails; an all-control input becomes the empty string.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect::<String>()
        .trim()
        .to_string()
}
