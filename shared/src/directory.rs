use log::{debug, info, warn};
use rand::Rng;
use uuid::Uuid;

use crate::errors::DirectoryError;
use crate::models::{now_str, Organization, OrganizationInput};

const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const JOIN_CODE_LEN: usize = 5;

/// Redraws allowed when a generated code is already taken
const MAX_JOIN_CODE_ATTEMPTS: usize = 16;

/// Draws a join code of `JOIN_CODE_LEN` independent uniform samples from `[A-Z0-9]`.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..JOIN_CODE_LEN)
        .map(|_| JOIN_CODE_ALPHABET[rng.random_range(0..JOIN_CODE_ALPHABET.len())] as char)
        .collect()
}

/// In-memory, insertion-ordered collection of organizations.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    organizations: Vec<Organization>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from pre-seeded records, keeping their order.
    pub fn with_organizations(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }

    /// Validates the form, assigns a fresh join code and appends the record.
    pub fn add(&mut self, input: OrganizationInput) -> Result<Organization, DirectoryError> {
        self.add_with(input, generate_join_code)
    }

    fn add_with<F>(
        &mut self,
        input: OrganizationInput,
        next_code: F,
    ) -> Result<Organization, DirectoryError>
    where
        F: FnMut() -> String,
    {
        if input.name.is_empty() {
            return Err(DirectoryError::MissingField("name"));
        }
        if input.description.is_empty() {
            return Err(DirectoryError::MissingField("description"));
        }
        if input.sign_up_link.is_empty() {
            return Err(DirectoryError::MissingField("signUpLink"));
        }

        let join_code = self.unused_join_code(next_code)?;

        let organization = Organization {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            sign_up_link: input.sign_up_link,
            join_code,
            created_at: now_str(),
        };

        info!(
            "Added organization id={}, name={}, join_code={}",
            organization.id, organization.name, organization.join_code
        );

        self.organizations.push(organization.clone());
        Ok(organization)
    }

    /// Appends a record as-is. Join codes are not checked for duplicates.
    pub fn insert(&mut self, organization: Organization) {
        if self.find_by_join_code(&organization.join_code).is_some() {
            warn!(
                "Inserting organization {} with duplicate join code {}; lookups keep returning the earlier record",
                organization.name, organization.join_code
            );
        }
        self.organizations.push(organization);
    }

    /// Case-insensitive exact match on join code. The earliest inserted record wins.
    pub fn find_by_join_code(&self, code: &str) -> Option<&Organization> {
        let code = code.to_lowercase();
        self.organizations
            .iter()
            .find(|o| o.join_code.to_lowercase() == code)
    }

    /// Case-insensitive substring match on name; an empty query returns everything.
    pub fn filter_by_name(&self, query: &str) -> Vec<&Organization> {
        if query.is_empty() {
            return self.organizations.iter().collect();
        }

        let query = query.to_lowercase();
        self.organizations
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    pub fn all(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    fn unused_join_code<F>(&self, mut next_code: F) -> Result<String, DirectoryError>
    where
        F: FnMut() -> String,
    {
        for attempt in 1..=MAX_JOIN_CODE_ATTEMPTS {
            let code = next_code();
            if self.find_by_join_code(&code).is_none() {
                return Ok(code);
            }
            debug!("Join code {} already taken (attempt {})", code, attempt);
        }
        Err(DirectoryError::JoinCodeExhausted(MAX_JOIN_CODE_ATTEMPTS))
    }
}
