use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

use crate::errors::NetworkError;
use crate::gateway::{
    decode_accounts_response, decode_login_response, AuthGateway, DirectoryGateway,
};
use crate::models::Account;

enum Reply {
    Body(String),
    Error(NetworkError),
}

impl Reply {
    fn error(&self) -> Option<NetworkError> {
        match self {
            Reply::Error(e) => Some(e.clone()),
            Reply::Body(_) => None,
        }
    }

    fn body(&self) -> &[u8] {
        match self {
            Reply::Body(body) => body.as_bytes(),
            Reply::Error(_) => &[],
        }
    }
}

/// Auth gateway answering every request with a canned response body,
/// decoded the same way as the HTTP gateway.
pub struct MockAuthGateway {
    reply: Reply,
    requests: Mutex<Vec<String>>,
}

impl MockAuthGateway {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Body(body.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: NetworkError) -> Self {
        Self {
            reply: Reply::Error(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Usernames seen so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn authenticate(&self, username: &str, _password: &str) -> Result<String, NetworkError> {
        debug!("MockAuthGateway: authenticate {}", username);
        self.requests.lock().unwrap().push(username.to_string());

        if let Some(e) = self.reply.error() {
            return Err(e);
        }
        decode_login_response(self.reply.body())
    }
}

/// Accounts gateway answering every request with a canned response body.
pub struct MockDirectoryGateway {
    reply: Reply,
    tokens: Mutex<Vec<String>>,
}

impl MockDirectoryGateway {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Body(body.into()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: NetworkError) -> Self {
        Self {
            reply: Reply::Error(error),
            tokens: Mutex::new(Vec::new()),
        }
    }

    /// Bearer tokens seen so far, in call order
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryGateway for MockDirectoryGateway {
    async fn fetch_accounts(&self, token: &str) -> Result<Vec<Account>, NetworkError> {
        debug!("MockDirectoryGateway: fetch_accounts");
        self.tokens.lock().unwrap().push(token.to_string());

        if let Some(e) = self.reply.error() {
            return Err(e);
        }
        decode_accounts_response(self.reply.body())
    }
}
