pub mod config;
pub mod directory;
pub mod errors;
pub mod gateway;
pub mod ledger;
pub mod models;
pub mod seed;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
