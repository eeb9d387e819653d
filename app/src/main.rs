use std::sync::Arc;

use log::{info, warn};
use volunteens_shared::config::AppConfig;
use volunteens_shared::gateway::{
    AuthGateway, DirectoryGateway, HttpAuthGateway, HttpDirectoryGateway,
};
use volunteens_shared::store::{FileStore, KeyValueStore, MemoryStore};

use volunteens_app::flows::{spawn_fetch_accounts, spawn_login};
use volunteens_app::state::{AppState, AppStore, Event};

const USERNAME_VAR: &str = "VOLUNTEENS_USERNAME";
const PASSWORD_VAR: &str = "VOLUNTEENS_PASSWORD";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Volunteens client");

    let config = AppConfig::from_env();

    let kv_store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            info!("Using file-backed store at {}", path.display());
            Arc::new(FileStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    };

    let auth: Arc<dyn AuthGateway> = Arc::new(HttpAuthGateway::new(&config.auth_url)?);
    let accounts: Arc<dyn DirectoryGateway> =
        Arc::new(HttpDirectoryGateway::new(&config.accounts_url)?);

    let mut store = AppStore::new(AppState::new(&config, kv_store));
    store.dispatch(Event::MainViewEntered);

    let (username, password) = match (std::env::var(USERNAME_VAR), std::env::var(PASSWORD_VAR)) {
        (Ok(username), Ok(password)) => (username, password),
        _ => {
            warn!("{} / {} not set, skipping login", USERNAME_VAR, PASSWORD_VAR);
            log_summary(store.state());
            return Ok(());
        }
    };

    let dispatcher = store.dispatcher();
    spawn_login(auth, username, password, dispatcher);
    if store.next_event().await.is_none() {
        warn!("Login task ended without reporting a result");
    }

    if let Some(token) = store.state().session().token().map(str::to_string) {
        let dispatcher = store.dispatcher();
        spawn_fetch_accounts(accounts, token, dispatcher);
        if store.next_event().await.is_none() {
            warn!("Accounts task ended without reporting a result");
        }
    }

    log_summary(store.state());
    Ok(())
}

fn log_summary(state: &AppState) {
    info!(
        "Session: logged_in={}, accounts={}, error={:?}",
        state.session().is_logged_in(),
        state.accounts().len(),
        state.error_banner()
    );
    for organization in state.filtered_organizations() {
        info!(
            "{} [{}]: {} hour entries",
            organization.name,
            organization.join_code,
            state.ledger().entries(organization.id).len()
        );
    }
}
