use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::{Client, Url};

use super::{decode_accounts_response, decode_login_response, AuthGateway, DirectoryGateway};
use crate::errors::NetworkError;
use crate::models::{Account, LoginRequest};
use crate::session::mask_token;

fn parse_endpoint(url: &str) -> Result<Url, NetworkError> {
    Url::parse(url).map_err(|e| {
        error!("Invalid endpoint URL {}: {}", url, e);
        NetworkError::InvalidEndpoint(url.to_string())
    })
}

fn build_client() -> Result<Client, NetworkError> {
    Client::builder()
        .build()
        .map_err(|e| NetworkError::Custom(format!("Failed to build HTTP client: {}", e)))
}

/// Reads the whole body; a transport failure at this point counts as no data.
async fn read_body(response: reqwest::Response, what: &str) -> Result<Vec<u8>, NetworkError> {
    let status = response.status();
    if !status.is_success() {
        warn!("{} endpoint returned status {}", what, status);
    }

    response.bytes().await.map(|b| b.to_vec()).map_err(|e| {
        error!("Failed to read {} response body: {}", what, e);
        NetworkError::NoResponseData
    })
}

/// POSTs `{username, password}` as JSON to the login endpoint.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: Client,
    url: String,
}

impl HttpAuthGateway {
    pub fn new(url: impl Into<String>) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_client()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn authenticate(&self, username: &str, password: &str) -> Result<String, NetworkError> {
        let url = parse_endpoint(&self.url)?;
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        info!("Sending login request for user {} to {}", username, url);

        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send login request: {}", e);
                NetworkError::NoResponseData
            })?;

        let body = read_body(response, "Login").await?;
        let token = decode_login_response(&body)?;

        info!("Login succeeded for user {}, token {}", username, mask_token(&token));
        Ok(token)
    }
}

/// GETs the account list with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpDirectoryGateway {
    client: Client,
    url: String,
}

impl HttpDirectoryGateway {
    pub fn new(url: impl Into<String>) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_client()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DirectoryGateway for HttpDirectoryGateway {
    async fn fetch_accounts(&self, token: &str) -> Result<Vec<Account>, NetworkError> {
        let url = parse_endpoint(&self.url)?;

        info!("Fetching accounts from {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send accounts request: {}", e);
                NetworkError::NoResponseData
            })?;

        let body = read_body(response, "Accounts").await?;
        let accounts = decode_accounts_response(&body)?;

        info!("Fetched {} accounts", accounts.len());
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "username": "sam@example.org",
                "password": "hunter2"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"abc123","success":true}"#)
            .create_async()
            .await;

        let gateway = HttpAuthGateway::new(format!("{}/login", server.url())).unwrap();
        let token = gateway
            .authenticate("sam@example.org", "hunter2")
            .await
            .unwrap();

        assert_eq!(token, "abc123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_null_token_is_invalid_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(401)
            .with_body(r#"{"token":null,"message":"Invalid password","success":false}"#)
            .create_async()
            .await;

        let gateway = HttpAuthGateway::new(format!("{}/login", server.url())).unwrap();
        let result = gateway.authenticate("sam@example.org", "wrong").await;

        assert_eq!(result, Err(NetworkError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_garbage_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let gateway = HttpAuthGateway::new(format!("{}/login", server.url())).unwrap();
        let result = gateway.authenticate("sam@example.org", "hunter2").await;

        assert!(matches!(result, Err(NetworkError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_invalid_endpoint() {
        let gateway = HttpAuthGateway::new("not a url").unwrap();
        assert_eq!(
            gateway.authenticate("a", "b").await,
            Err(NetworkError::InvalidEndpoint("not a url".to_string()))
        );

        let gateway = HttpDirectoryGateway::new("").unwrap();
        assert_eq!(
            gateway.fetch_accounts("abc123").await,
            Err(NetworkError::InvalidEndpoint(String::new()))
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_no_data() {
        // nothing listens on port 9 (discard) in the test environment
        let gateway = HttpDirectoryGateway::new("http://127.0.0.1:9/accounts").unwrap();
        assert_eq!(
            gateway.fetch_accounts("abc123").await,
            Err(NetworkError::NoResponseData)
        );
    }

    #[tokio::test]
    async fn test_fetch_accounts_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/accounts")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"id": "6f1c2b9e-6f0a-4c1e-9a57-2a4e1b0b9f11", "name": "Sam", "email": "sam@example.org"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let gateway = HttpDirectoryGateway::new(format!("{}/accounts", server.url())).unwrap();
        let accounts = gateway.fetch_accounts("abc123").await.unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Sam");
        assert_eq!(accounts[0].email, "sam@example.org");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_accounts_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts")
            .with_status(200)
            .with_body(r#"[{"id": "6f1c2b9e-6f0a-4c1e-9a57-2a4e1b0b9f11", "name": "Sam""#)
            .create_async()
            .await;

        let gateway = HttpDirectoryGateway::new(format!("{}/accounts", server.url())).unwrap();
        let result = gateway.fetch_accounts("abc123").await;

        assert!(matches!(result, Err(NetworkError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_fetch_accounts_empty_body_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts")
            .with_status(204)
            .create_async()
            .await;

        let gateway = HttpDirectoryGateway::new(format!("{}/accounts", server.url())).unwrap();
        assert_eq!(
            gateway.fetch_accounts("abc123").await,
            Err(NetworkError::NoResponseData)
        );
    }
}
