use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub display_name: String,
}

/// Serialized user. Password, confirmation token and remember token never leave the server.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub slug: String,
    pub active: bool,
    pub confirmed: bool,
    pub locale: String,
    pub timezone: String,
    pub avatar: String,
    pub is_super_admin: bool,
    pub formatted_roles: String,
    pub roles: Vec<RoleResponse>,
    /// Permission name → whether the *acting* user holds it
    pub can: BTreeMap<String, bool>,
    pub last_access_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /account`: the profile page with the data every page receives.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountPage {
    pub user: UserResponse,
    /// Supported locale code → native language name
    pub locales: BTreeMap<String, String>,
    /// IANA timezone identifiers
    pub timezones: Vec<String>,
    /// Configured social provider → linked or not
    pub providers: BTreeMap<String, bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
    pub expires_in: i64,
}

/// Public login response (does not include refresh token)
#[derive(Serialize, Deserialize, Debug)]
pub struct PublicLoginResponse {
    pub access_token: String,
    pub user: UserResponse,
    pub expires_in: i64,
}

impl From<LoginResponse> for PublicLoginResponse {
    fn from(src: LoginResponse) -> Self {
        Self {
            access_token: src.access_token,
            user: src.user,
            expires_in: src.expires_in,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FormSubmissionResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub submission_type: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
