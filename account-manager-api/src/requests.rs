use serde::{Deserialize, Serialize};

// -------- REQUEST DTOs --------
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String, // Plain text
    #[serde(default)]
    pub password_confirmation: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String, // Plain text
}

/// Profile form (`POST /account`)
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub timezone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SendPasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_register_fields_deserialize_as_empty() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@example.com","password":"secret1"}"#).unwrap();
        assert!(request.name.is_empty());
        assert!(request.password_confirmation.is_empty());
        assert_eq!(request.locale, None);
    }

    #[test]
    fn empty_reset_body_deserializes() {
        let request: ResetPasswordRequest = serde_json::from_str("{}").unwrap();
        assert!(request.token.is_empty());
    }
}
