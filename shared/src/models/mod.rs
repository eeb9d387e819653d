use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod auth;

pub use auth::{LoginRequest, LoginResponse};

/// Current time as an RFC3339 string
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// A volunteer organization listed in the directory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub sign_up_link: String,
    /// Matched case-insensitively, see `Directory::find_by_join_code`
    pub join_code: String,
    pub created_at: String,
}

impl Organization {
    /// Builds a record with an already known join code (seed data, imports).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sign_up_link: impl Into<String>,
        join_code: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            sign_up_link: sign_up_link.into(),
            join_code: join_code.into(),
            created_at: now_str(),
        }
    }

    /// Parsed sign-up link, `None` when the stored text is not a valid URL
    pub fn sign_up_url(&self) -> Option<Url> {
        Url::parse(&self.sign_up_link).ok()
    }
}

/// Form data submitted when adding an organization
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    pub name: String,
    pub description: String,
    pub sign_up_link: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoursEntry {
    pub volunteer_name: String,
    pub hours: u32,
    pub logged_at: String,
}

impl HoursEntry {
    pub fn new(volunteer_name: impl Into<String>, hours: u32) -> Self {
        Self {
            volunteer_name: volunteer_name.into(),
            hours,
            logged_at: now_str(),
        }
    }
}

/// Account record returned by the accounts endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
