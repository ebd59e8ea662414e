use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every caller-fixable condition maps to 400 with a `{ error, details? }`
/// JSON body; anything unanticipated maps to 500. Nothing propagates to the
/// client as an unhandled fault.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("No file uploaded")]
    MissingFile,

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::UnsupportedType(declared) => (
                StatusCode::BAD_REQUEST,
                "Unsupported file type. Please upload a PDF or Word document.".to_string(),
                Some(format!("declared type: {declared}")),
            ),
            AppError::PayloadTooLarge { size, limit } => (
                StatusCode::BAD_REQUEST,
                "File too large.".to_string(),
                Some(format!("{size} bytes exceeds the {limit} byte limit")),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::BAD_REQUEST,
                "Method not allowed.".to_string(),
                Some("only POST is accepted".to_string()),
            ),
            AppError::MissingFile => (
                StatusCode::BAD_REQUEST,
                "No file uploaded.".to_string(),
                None,
            ),
            AppError::Extraction(reason) => (
                StatusCode::BAD_REQUEST,
                "Failed to extract text from the document.".to_string(),
                Some(reason.clone()),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({ "error": error });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_are_400() {
        for err in [
            AppError::UnsupportedType("image/png".to_string()),
            AppError::PayloadTooLarge {
                size: 6 * 1024 * 1024,
                limit: 5 * 1024 * 1024,
            },
            AppError::MethodNotAllowed,
            AppError::MissingFile,
            AppError::Extraction("too short".to_string()),
        ] {
            let (status, body) = body_json(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_internal_is_500_without_details() {
        let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_details_omitted_when_absent() {
        let (_, body) = body_json(AppError::MissingFile).await;
        assert!(body.get("details").is_none());
        let (_, body) = body_json(AppError::Extraction("reason".to_string())).await;
        assert_eq!(body["details"], "reason");
    }
}
