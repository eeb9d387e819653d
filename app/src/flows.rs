use std::sync::Arc;

use log::debug;
use tokio::task::JoinHandle;
use volunteens_shared::gateway::{AuthGateway, DirectoryGateway};

use crate::state::{Dispatcher, Event};

/// Runs one login round-trip on the runtime and reports the outcome as an event.
pub fn spawn_login(
    gateway: Arc<dyn AuthGateway>,
    username: String,
    password: String,
    dispatcher: Dispatcher,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Login task started for {}", username);
        let event = match gateway.authenticate(&username, &password).await {
            Ok(token) => Event::LoginSucceeded(token),
            Err(e) => Event::LoginFailed(e),
        };
        dispatcher.send(event);
    })
}

/// Runs one accounts fetch on the runtime and reports the outcome as an event.
pub fn spawn_fetch_accounts(
    gateway: Arc<dyn DirectoryGateway>,
    token: String,
    dispatcher: Dispatcher,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Accounts task started");
        let event = match gateway.fetch_accounts(&token).await {
            Ok(accounts) => Event::AccountsLoaded(accounts),
            Err(e) => Event::AccountsFailed(e),
        };
        dispatcher.send(event);
    })
}
