use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::detect::{route, DocumentKind};
use crate::extraction::fields::{extract_fields, ExtractedSections, PersonalInfo};
use crate::extraction::pdf::extract_pdf_text;
use crate::extraction::word::extract_word_text;
use crate::state::AppState;

/// Response body for a successful extraction. The optional aggregates are
/// omitted when nothing inside them matched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub extracted_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<ExtractedSections>,
}

/// POST /api/v1/cv/extract
///
/// Accepts a multipart form with one file field, routes it by declared
/// media type, and returns the extracted text plus any structured fields
/// recovered from it. The document is never persisted here; the caller
/// owns storage.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, AppError> {
    let policy = &state.config.extraction;

    let mut upload: Option<(String, String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow!("multipart read failed: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let declared = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(anyhow!("failed to read upload body: {e}")))?;
        upload = Some((file_name, declared, data));
        break;
    }

    let Some((file_name, declared, data)) = upload else {
        return Err(AppError::MissingFile);
    };

    let kind = route(&declared, data.len(), policy).inspect_err(|e| {
        tracing::warn!(file = %file_name, "rejected upload: {e}");
    })?;

    tracing::info!(
        file = %file_name,
        kind = kind.as_str(),
        bytes = data.len(),
        "extracting uploaded document"
    );

    let text = match kind {
        DocumentKind::Pdf => extract_pdf_text(&data, policy),
        DocumentKind::Doc | DocumentKind::Docx => extract_word_text(&data, policy),
    }
    .inspect_err(|e| tracing::warn!(file = %file_name, "extraction failed: {e}"))?;

    let fields = extract_fields(&text);

    Ok(Json(ExtractionResult {
        extracted_text: text,
        personal_info: fields.personal_info,
        sections: fields.sections,
    }))
}
