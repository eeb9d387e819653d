use std::sync::Arc;

use log::{error, info, warn};

use crate::errors::StoreError;
use crate::store::KeyValueStore;

pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// How the session is stored and when it is discarded.
#[derive(Debug, Clone)]
pub struct SessionPolicy {
    /// Key the token is persisted under
    pub token_key: String,
    /// Clear the session every time the main view is entered. This forces a
    /// fresh login on each visit and is on by default.
    pub reset_on_entry: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            reset_on_entry: true,
        }
    }
}

/// Holds the authentication token and the cached logged-in flag.
///
/// `is_logged_in` is tracked separately from the token: a token restored
/// from the key-value store does not log the user in.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    policy: SessionPolicy,
    token: Option<String>,
    is_logged_in: bool,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, policy: SessionPolicy) -> Self {
        let token = match store.get(&policy.token_key) {
            Ok(token) => token,
            Err(e) => {
                error!("Failed to read persisted session token: {}", e);
                None
            }
        };

        if token.is_some() {
            info!("Restored persisted session token (not logged in until next login)");
        }

        Self {
            store,
            policy,
            token,
            is_logged_in: false,
        }
    }

    /// Records a successful login. The in-memory session is updated even if
    /// persisting the token fails.
    pub fn login(&mut self, token: impl Into<String>) -> Result<(), StoreError> {
        let token = token.into();
        info!("Session logged in with token {}", mask_token(&token));

        let persisted = self.store.set(&self.policy.token_key, &token);
        if let Err(e) = &persisted {
            error!("Failed to persist session token: {}", e);
        }

        self.token = Some(token);
        self.is_logged_in = true;
        persisted
    }

    /// Called whenever the main view is displayed.
    pub fn reset_on_entry(&mut self) -> Result<(), StoreError> {
        if !self.policy.reset_on_entry {
            return Ok(());
        }

        if self.is_logged_in {
            warn!("Main view entered: discarding the active session, a new login is required");
        }
        self.clear()
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        info!("Session logged out");
        self.clear()
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.token = None;
        self.is_logged_in = false;
        self.store.remove(&self.policy.token_key).map_err(|e| {
            error!("Failed to remove persisted session token: {}", e);
            e
        })
    }
}

/// First four characters of a token, for logs.
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session_with(policy: SessionPolicy) -> (SessionStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SessionStore::new(store.clone(), policy), store)
    }

    #[test]
    fn test_login_sets_token_and_flag() {
        let (mut session, store) = session_with(SessionPolicy::default());
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);

        session.login("abc123").unwrap();

        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some("abc123"));
        assert_eq!(
            store.get(DEFAULT_TOKEN_KEY).unwrap().as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_reset_on_entry_discards_login() {
        let (mut session, store) = session_with(SessionPolicy::default());
        session.login("abc123").unwrap();

        session.reset_on_entry().unwrap();

        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
        assert_eq!(store.get(DEFAULT_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_reset_on_entry_can_be_disabled() {
        let (mut session, _store) = session_with(SessionPolicy {
            reset_on_entry: false,
            ..SessionPolicy::default()
        });
        session.login("abc123").unwrap();

        session.reset_on_entry().unwrap();

        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some("abc123"));
    }

    #[test]
    fn test_restored_token_does_not_log_in() {
        let store = Arc::new(MemoryStore::new());
        store.set("jsonwebtoken", "persisted").unwrap();

        let session = SessionStore::new(
            store,
            SessionPolicy {
                token_key: "jsonwebtoken".to_string(),
                reset_on_entry: true,
            },
        );

        assert_eq!(session.token(), Some("persisted"));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_logout_clears_persisted_token() {
        let (mut session, store) = session_with(SessionPolicy {
            reset_on_entry: false,
            ..SessionPolicy::default()
        });
        session.login("abc123").unwrap();
        session.logout().unwrap();

        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
        assert_eq!(store.get(DEFAULT_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abc123"), "abc1...");
        assert_eq!(mask_token("ab"), "ab...");
    }
}
