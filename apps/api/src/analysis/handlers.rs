use axum::{extract::State, Json};

use crate::analysis::rules::{analyze, AnalysisReport};
use crate::errors::AppError;
use crate::models::cv::CvDocument;
use crate::state::AppState;

/// POST /api/v1/cv/analyze
///
/// Thin adapter over the pure rule engine for the review UI. The issue
/// list is regenerated from scratch on every call; fix-tracking lives in
/// the caller's session state.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(doc): Json<CvDocument>,
) -> Result<Json<AnalysisReport>, AppError> {
    Ok(Json(analyze(&doc, &state.config.extraction)))
}
