use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
}

/// One-request status message attached to a redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    /// Translation key, stable across locales
    pub key: String,
    /// Message translated in the acting user's locale
    pub message: String,
}

impl Flash {
    pub fn success(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Body returned by every mutating action: where to go next and what to say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub redirect_to: String,
    pub flash: Flash,
}

impl ActionResponse {
    pub fn new(redirect_to: impl Into<String>, flash: Flash) -> Self {
        Self {
            redirect_to: redirect_to.into(),
            flash,
        }
    }
}
