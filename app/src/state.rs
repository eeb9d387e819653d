use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::mpsc;
use uuid::Uuid;
use volunteens_shared::config::AppConfig;
use volunteens_shared::directory::Directory;
use volunteens_shared::errors::NetworkError;
use volunteens_shared::ledger::HoursLedger;
use volunteens_shared::models::{Account, Organization, OrganizationInput};
use volunteens_shared::seed;
use volunteens_shared::session::SessionStore;
use volunteens_shared::store::KeyValueStore;

/// Name recorded when hours are submitted without one
pub const DEFAULT_VOLUNTEER_NAME: &str = "New Volunteer";

/// Everything the presentation layer can ask the store to do, plus the
/// completions of gateway calls.
#[derive(Debug, Clone)]
pub enum Event {
    MainViewEntered,
    SearchChanged(String),
    OrganizationSubmitted(OrganizationInput),
    OrganizationSelected(Uuid),
    JoinCodeSubmitted(String),
    HoursSubmitted {
        organization_id: Uuid,
        volunteer_name: Option<String>,
        hours: String,
    },
    LoginSucceeded(String),
    LoginFailed(NetworkError),
    AccountsLoaded(Vec<Account>),
    AccountsFailed(NetworkError),
    LoggedOut,
    ErrorDismissed,
}

/// Application state owned by the root. Screens only get `&AppState`.
pub struct AppState {
    directory: Directory,
    ledger: HoursLedger,
    session: SessionStore,
    joined: Vec<Uuid>,
    accounts: Vec<Account>,
    search_query: String,
    selected: Option<Uuid>,
    error_banner: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let mut directory = Directory::new();
        let mut ledger = HoursLedger::new();
        if config.seed_samples {
            seed::seed(&mut directory, &mut ledger);
            info!("Seeded {} sample organizations", directory.len());
        }

        Self {
            directory,
            ledger,
            session: SessionStore::new(store, config.session.clone()),
            joined: Vec::new(),
            accounts: Vec::new(),
            search_query: String::new(),
            selected: None,
            error_banner: None,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn ledger(&self) -> &HoursLedger {
        &self.ledger
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Organizations matching the current search query
    pub fn filtered_organizations(&self) -> Vec<&Organization> {
        self.directory.filter_by_name(&self.search_query)
    }

    pub fn selected_organization(&self) -> Option<&Organization> {
        self.selected.and_then(|id| self.directory.get(id))
    }

    /// Groups joined by code, in join order
    pub fn joined_organizations(&self) -> Vec<&Organization> {
        self.joined
            .iter()
            .filter_map(|id| self.directory.get(*id))
            .collect()
    }

    /// Hours per organization name for the profile screen
    pub fn profile_breakdown(&self, volunteer_name: &str) -> Vec<(String, u64)> {
        self.ledger
            .breakdown_for(volunteer_name)
            .into_iter()
            .filter_map(|(id, hours)| self.directory.get(id).map(|o| (o.name.clone(), hours)))
            .collect()
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::MainViewEntered => {
                if let Err(e) = self.session.reset_on_entry() {
                    error!("Failed to reset session on main view entry: {}", e);
                }
            }
            Event::SearchChanged(query) => {
                self.search_query = query;
            }
            Event::OrganizationSubmitted(input) => match self.directory.add(input) {
                Ok(organization) => {
                    info!(
                        "Organization {} created with join code {}",
                        organization.name, organization.join_code
                    );
                }
                Err(e) => {
                    warn!("Organization not added: {}", e);
                    self.error_banner = Some(e.to_string());
                }
            },
            Event::OrganizationSelected(id) => {
                if self.directory.get(id).is_some() {
                    self.selected = Some(id);
                } else {
                    warn!("Selected unknown organization {}", id);
                }
            }
            Event::JoinCodeSubmitted(code) => self.join_with_code(&code),
            Event::HoursSubmitted {
                organization_id,
                volunteer_name,
                hours,
            } => {
                if self.directory.get(organization_id).is_none() {
                    warn!("Hours submitted for unknown organization {}", organization_id);
                    return;
                }
                let volunteer_name = volunteer_name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| DEFAULT_VOLUNTEER_NAME.to_string());
                self.ledger.add_hours(organization_id, &volunteer_name, &hours);
            }
            Event::LoginSucceeded(token) => {
                if let Err(e) = self.session.login(token) {
                    error!("Logged in, but the token was not persisted: {}", e);
                }
                self.error_banner = None;
            }
            Event::LoginFailed(e) => {
                error!("Login failed: {}", e);
                self.error_banner = Some(e.to_string());
            }
            Event::AccountsLoaded(accounts) => {
                info!("Loaded {} accounts", accounts.len());
                self.accounts = accounts;
            }
            Event::AccountsFailed(e) => {
                error!("Fetching accounts failed: {}", e);
                self.accounts.clear();
                self.error_banner = Some(e.to_string());
            }
            Event::LoggedOut => {
                if let Err(e) = self.session.logout() {
                    error!("Failed to clear session on logout: {}", e);
                }
                self.accounts.clear();
            }
            Event::ErrorDismissed => {
                self.error_banner = None;
            }
        }
    }

    fn join_with_code(&mut self, code: &str) {
        let Some(organization) = self.directory.find_by_join_code(code) else {
            info!("That code doesn't seem to work, try again! (code={})", code);
            return;
        };

        let id = organization.id;
        info!("Joined organization {} with code {}", organization.name, code);
        self.selected = Some(id);
        if !self.joined.contains(&id) {
            self.joined.push(id);
        }
    }
}

/// Handle for sending events to the store from other tasks.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Event>,
}

impl Dispatcher {
    pub fn send(&self, event: Event) {
        if self.tx.send(event).is_err() {
            warn!("App store is gone, dropping event");
        }
    }
}

/// Owns the state and applies events one at a time on the owning task.
///
/// The store holds only a weak sender, so the channel closes once every
/// `Dispatcher` is dropped and `next_event` returns `None` instead of waiting.
pub struct AppStore {
    state: AppState,
    tx: mpsc::WeakUnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl AppStore {
    pub fn new(state: AppState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            tx: tx.downgrade(),
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Hands out a sender. Reopens the channel when the previous one has
    /// closed, carrying over events still queued in it.
    pub fn dispatcher(&mut self) -> Dispatcher {
        if let Some(tx) = self.tx.upgrade() {
            return Dispatcher { tx };
        }

        let (tx, rx) = mpsc::unbounded_channel();
        while let Ok(event) = self.rx.try_recv() {
            let _ = tx.send(event);
        }
        self.rx = rx;
        self.tx = tx.downgrade();
        Dispatcher { tx }
    }

    /// Applies an event synchronously.
    pub fn dispatch(&mut self, event: Event) {
        self.state.apply(event);
    }

    /// Waits for the next event sent through a `Dispatcher`, applies it and
    /// returns a copy. `None` once all dispatchers are gone and the queue is empty.
    pub async fn next_event(&mut self) -> Option<Event> {
        let event = self.rx.recv().await?;
        self.dispatch(event.clone());
        Some(event)
    }

    /// Applies every event already queued without waiting; returns how many.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }
}
