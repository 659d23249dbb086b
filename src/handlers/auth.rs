use account_manager_api::{
    ActionResponse, LoginRequest, PublicLoginResponse, RefreshTokenResponse, RegisterRequest,
    ResetPasswordRequest, SendPasswordResetRequest, UserResponse,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, header},
};

use crate::auth::extractors::CurrentUser;
use crate::error::AppError;
use crate::response::AppResponse;
use crate::state::AppState;

const REFRESH_COOKIE: &str = "refresh_token";
const REFRESH_COOKIE_ATTRIBUTES: &str = "HttpOnly; Secure; SameSite=Strict; Path=/auth";

/// POST /auth/register
/// Inscription d'un nouvel utilisateur
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<AppResponse<UserResponse>, AppError> {
    let Json(payload) = payload?;
    let user = state.auth.register(payload)?;
    Ok(AppResponse::created(user))
}

/// POST /auth/login
/// Logs a user in; the refresh token only travels in the cookie
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<AppResponse<PublicLoginResponse>, AppError> {
    let Json(payload) = payload?;
    let response = state.auth.login(&payload)?;
    let headers = refresh_cookie(&response.refresh_token)?;
    Ok(AppResponse::ok(PublicLoginResponse::from(response)).with_headers(headers))
}

/// POST /auth/refresh
/// Rafraîchissement des tokens
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<AppResponse<RefreshTokenResponse>, AppError> {
    let raw = read_cookie(&headers, REFRESH_COOKIE)
        .ok_or_else(|| AppError::unauthorized("Missing refresh_token cookie"))?;

    let (response, rotated) = state.auth.refresh(raw)?;
    Ok(AppResponse::ok(response).with_headers(refresh_cookie(&rotated)?))
}

/// POST /auth/logout
/// Logs out by revoking every refresh token of the user
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<AppResponse<serde_json::Value>, AppError> {
    state.auth.logout(user.id())?;
    Ok(AppResponse::ok(serde_json::json!({ "message": "Logged out successfully" }))
        .with_headers(clear_refresh_cookie()))
}

/// POST /password/email
pub async fn send_password_reset(
    State(state): State<AppState>,
    payload: Result<Json<SendPasswordResetRequest>, JsonRejection>,
) -> Result<AppResponse<ActionResponse>, AppError> {
    let Json(payload) = payload?;
    Ok(AppResponse::ok(state.auth.send_password_reset(&payload)?))
}

/// POST /password/reset
pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<AppResponse<ActionResponse>, AppError> {
    let Json(payload) = payload?;
    Ok(AppResponse::ok(state.auth.reset_password(&payload)?))
}

fn refresh_cookie(token: &str) -> Result<HeaderMap, AppError> {
    let value = format!("{REFRESH_COOKIE}={token}; {REFRESH_COOKIE_ATTRIBUTES}");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&value).map_err(|_| AppError::internal("Failed to set cookie"))?,
    );
    Ok(headers)
}

pub fn clear_refresh_cookie() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_static(
            "refresh_token=; Max-Age=0; HttpOnly; Secure; SameSite=Strict; Path=/auth",
        ),
    );
    headers
}

fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
