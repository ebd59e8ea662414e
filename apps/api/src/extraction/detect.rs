//! Format detection and routing for uploaded documents.
//!
//! Pure classification over the declared media type and byte length; all
//! rejection happens here, before any bytes are inspected.

use serde::{Deserialize, Serialize};

use crate::config::ExtractionPolicy;
use crate::errors::AppError;

pub const MEDIA_TYPE_PDF: &str = "application/pdf";
pub const MEDIA_TYPE_DOC: &str = "application/msword";
pub const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The closed set of document formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            MEDIA_TYPE_PDF => Some(DocumentKind::Pdf),
            MEDIA_TYPE_DOC => Some(DocumentKind::Doc),
            MEDIA_TYPE_DOCX => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
        }
    }
}

/// Classifies an upload by declared media type and size.
///
/// Rejects unknown media types with `UnsupportedType` and payloads over the
/// configured cap with `PayloadTooLarge`. No side effects.
pub fn route(
    media_type: &str,
    byte_length: usize,
    policy: &ExtractionPolicy,
) -> Result<DocumentKind, AppError> {
    let kind = DocumentKind::from_media_type(media_type)
        .ok_or_else(|| AppError::UnsupportedType(media_type.to_string()))?;

    if byte_length > policy.max_upload_bytes {
        return Err(AppError::PayloadTooLarge {
            size: byte_length,
            limit: policy.max_upload_bytes,
        });
    }

    Ok(kind)
}
