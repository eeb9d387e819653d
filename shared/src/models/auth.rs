use serde::{Deserialize, Serialize};

/// Body of the login POST
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of the login endpoint. Every field is optional on the wire;
/// a missing or null `token` means the credentials were rejected.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}
