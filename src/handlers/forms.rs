use account_manager_api::FormSubmissionResponse;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::error::AppError;
use crate::response::AppResponse;
use crate::state::AppState;

/// POST /forms/{type}
/// Any JSON body is accepted and stored as-is
pub async fn submit(
    State(state): State<AppState>,
    Path(submission_type): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<AppResponse<FormSubmissionResponse>, AppError> {
    let Json(payload) = payload?;
    let created = state.forms.submit(&submission_type, &payload)?;
    Ok(AppResponse::created(created))
}
