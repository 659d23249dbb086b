use account_manager_api::{
    AccountPage, ActionResponse, ChangePasswordRequest, UpdateAccountRequest,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, header},
};

use crate::auth::extractors::CurrentUser;
use crate::error::AppError;
use crate::handlers::auth::clear_refresh_cookie;
use crate::response::AppResponse;
use crate::state::AppState;

/// GET /account
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResponse<AccountPage> {
    AppResponse::ok(state.accounts.index(&user))
}

/// POST /account
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<AppResponse<ActionResponse>, AppError> {
    let Json(payload) = payload?;
    Ok(AppResponse::ok(state.accounts.update(&user, payload)?))
}

/// POST /account/confirmation
pub async fn send_confirmation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Result<AppResponse<ActionResponse>, AppError> {
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    Ok(AppResponse::ok(
        state.accounts.send_confirmation(&user, referer)?,
    ))
}

/// GET|POST /account/confirmation/{token}
pub async fn confirm_email(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(token): Path<String>,
) -> Result<AppResponse<ActionResponse>, AppError> {
    Ok(AppResponse::ok(state.accounts.confirm_email(&user, &token)?))
}

/// POST /account/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<AppResponse<ActionResponse>, AppError> {
    let Json(payload) = payload?;
    Ok(AppResponse::ok(
        state.accounts.change_password(&user, &payload)?,
    ))
}

/// DELETE /account
/// The account goes first, the refresh cookie last.
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<AppResponse<ActionResponse>, AppError> {
    let response = state.accounts.delete(&user)?;
    Ok(AppResponse::ok(response).with_headers(clear_refresh_cookie()))
}
