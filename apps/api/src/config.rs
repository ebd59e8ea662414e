use anyhow::{Context, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
/// Every knob has a default; nothing is required at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub extraction: ExtractionPolicy,
}

/// Tunable thresholds for the extraction pipeline and the analyzer.
///
/// Defaults match the product's historical behavior: uploads capped at
/// 5 MiB, an extraction under 50 characters treated as failed, and an
/// extracted CV under 500 characters flagged as too brief.
#[derive(Debug, Clone)]
pub struct ExtractionPolicy {
    pub max_upload_bytes: usize,
    pub min_extracted_chars: usize,
    pub brief_content_chars: usize,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        ExtractionPolicy {
            max_upload_bytes: 5 * 1024 * 1024,
            min_extracted_chars: 50,
            brief_content_chars: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ExtractionPolicy::default();
        Ok(Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            extraction: ExtractionPolicy {
                max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
                min_extracted_chars: env_or("MIN_EXTRACTED_CHARS", defaults.min_extracted_chars)?,
                brief_content_chars: env_or("BRIEF_CONTENT_CHARS", defaults.brief_content_chars)?,
            },
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' is not valid")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let policy = ExtractionPolicy::default();
        assert_eq!(policy.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(policy.min_extracted_chars, 50);
        assert_eq!(policy.brief_content_chars, 500);
    }
}
