use async_trait::async_trait;
use log::{error, warn};

use crate::errors::NetworkError;
use crate::models::{Account, LoginResponse};

pub mod http;

pub use http::{HttpAuthGateway, HttpDirectoryGateway};

/// Exchanges credentials for a session token.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<String, NetworkError>;
}

/// Lists the accounts visible to a token.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    async fn fetch_accounts(&self, token: &str) -> Result<Vec<Account>, NetworkError>;
}

/// Maps a raw login response body to a token.
pub fn decode_login_response(body: &[u8]) -> Result<String, NetworkError> {
    if body.is_empty() {
        return Err(NetworkError::NoResponseData);
    }

    let response: LoginResponse = serde_json::from_slice(body).map_err(|e| {
        error!("Failed to parse login response: {}", e);
        NetworkError::MalformedResponse(e.to_string())
    })?;

    match response.token {
        Some(token) => Ok(token),
        None => {
            warn!(
                "Login rejected: success={:?}, message={:?}",
                response.success, response.message
            );
            Err(NetworkError::InvalidCredentials)
        }
    }
}

/// Maps a raw accounts response body to account records.
pub fn decode_accounts_response(body: &[u8]) -> Result<Vec<Account>, NetworkError> {
    if body.is_empty() {
        return Err(NetworkError::NoResponseData);
    }

    serde_json::from_slice(body).map_err(|e| {
        error!("Failed to parse accounts response: {}", e);
        NetworkError::MalformedResponse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_login_response() {
        assert_eq!(
            decode_login_response(br#"{"token":"abc123","success":true}"#),
            Ok("abc123".to_string())
        );
        assert_eq!(
            decode_login_response(br#"{"token":null,"message":"bad password"}"#),
            Err(NetworkError::InvalidCredentials)
        );
        assert_eq!(
            decode_login_response(br#"{}"#),
            Err(NetworkError::InvalidCredentials)
        );
        assert_eq!(decode_login_response(b""), Err(NetworkError::NoResponseData));
        assert!(matches!(
            decode_login_response(b"<html>oops</html>"),
            Err(NetworkError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_accounts_response() {
        let body = br#"[
            {"id":"6f1c2b9e-6f0a-4c1e-9a57-2a4e1b0b9f11","name":"Sam","email":"sam@example.org"},
            {"id":"0b6a4d6f-2a3c-4a4e-8f5e-7f2d9c1e3b22","name":"Alex","email":"alex@example.org"}
        ]"#;
        let accounts = decode_accounts_response(body).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name, "Sam");
        assert_eq!(accounts[1].email, "alex@example.org");

        // ids must be UUIDs
        assert!(matches!(
            decode_accounts_response(br#"[{"id":"42","name":"Sam","email":"s@e.org"}]"#),
            Err(NetworkError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_accounts_response(br#"{"accounts":[]}"#),
            Err(NetworkError::MalformedResponse(_))
        ));
        assert_eq!(decode_accounts_response(b"[]"), Ok(vec![]));
    }
}
