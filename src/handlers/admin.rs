use account_manager_api::{FormSubmissionResponse, UserResponse};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::extractors::CurrentUser;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionFilter {
    #[serde(rename = "type")]
    pub submission_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    #[serde(default)]
    pub active: bool,
    pub role: Option<String>,
}

/// GET /admin/form-submissions[?type=]
pub async fn list_submissions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<SubmissionFilter>,
) -> Result<AppResponse<Vec<FormSubmissionResponse>>, AppError> {
    let submissions = state
        .forms
        .list(&user, filter.submission_type.as_deref())?;
    Ok(AppResponse::ok(submissions))
}

/// GET /admin/form-submissions/{id}
pub async fn show_submission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<AppResponse<FormSubmissionResponse>, AppError> {
    Ok(AppResponse::ok(state.forms.show(&user, id)?))
}

/// DELETE /admin/form-submissions/{id}
pub async fn delete_submission(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> Result<AppResponse<()>, AppError> {
    state.forms.delete(&user, id)?;
    Ok(AppResponse::no_content())
}

/// GET /admin/users[?active=true][&role=name]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<UserFilter>,
) -> Result<AppResponse<Vec<UserResponse>>, AppError> {
    let users = state
        .accounts
        .list_users(&user, filter.active, filter.role.as_deref())?;
    Ok(AppResponse::ok(users))
}
