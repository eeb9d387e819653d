use std::path::PathBuf;

use log::info;

use crate::session::{SessionPolicy, DEFAULT_TOKEN_KEY};

/// Base URL the mobile client shipped with, used for both endpoints unless overridden.
pub const DEFAULT_API_URL: &str = "https://volunteens-api.up.railway.app";

pub const AUTH_URL_VAR: &str = "VOLUNTEENS_AUTH_URL";
pub const ACCOUNTS_URL_VAR: &str = "VOLUNTEENS_ACCOUNTS_URL";
pub const RESET_ON_ENTRY_VAR: &str = "VOLUNTEENS_RESET_ON_ENTRY";
pub const TOKEN_KEY_VAR: &str = "VOLUNTEENS_TOKEN_KEY";
pub const STORE_PATH_VAR: &str = "VOLUNTEENS_STORE_PATH";
pub const SEED_SAMPLES_VAR: &str = "VOLUNTEENS_SEED_SAMPLES";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth_url: String,
    pub accounts_url: String,
    pub session: SessionPolicy,
    /// Where the key-value store lives; in-memory when unset
    pub store_path: Option<PathBuf>,
    pub seed_samples: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_API_URL.to_string(),
            accounts_url: DEFAULT_API_URL.to_string(),
            session: SessionPolicy::default(),
            store_path: None,
            seed_samples: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str, default: bool| {
            var(key)
                .map(|v| match v.to_lowercase().as_str() {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => default,
                })
                .unwrap_or(default)
        };

        let config = Self {
            auth_url: var(AUTH_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            accounts_url: var(ACCOUNTS_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session: SessionPolicy {
                token_key: var(TOKEN_KEY_VAR).unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string()),
                reset_on_entry: flag(RESET_ON_ENTRY_VAR, true),
            },
            store_path: var(STORE_PATH_VAR).map(PathBuf::from),
            seed_samples: flag(SEED_SAMPLES_VAR, true),
        };

        info!(
            "Loaded config: auth_url={}, accounts_url={}, reset_on_entry={}, store_path={:?}",
            config.auth_url, config.accounts_url, config.session.reset_on_entry, config.store_path
        );

        config
    }
}
