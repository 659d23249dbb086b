use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::account::profile::UserProfile;
use crate::error::AppError;
use crate::state::AppState;

const BEARER: &str = "Bearer ";

/// Utilisateur connecté pour les routes protégées.
/// Valide `Authorization: Bearer <JWT>` puis recharge l'utilisateur à chaque
/// requête (compte supprimé: 401, compte désactivé: 403).
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let profile = state.auth.authenticate(token)?;
        Ok(Self(profile))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::InvalidTokenFormat)?;

    auth_str
        .strip_prefix(BEARER)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::InvalidTokenFormat)
}
