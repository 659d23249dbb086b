use serde::{Deserialize, Serialize};

/// Public API error response format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field errors for validation failures (`{"password": ["..."]}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Form anchor the client should show again with the errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}
