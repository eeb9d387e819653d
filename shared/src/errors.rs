use thiserror::Error;

/// Failures of the auth and accounts gateways
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("No data received")]
    NoResponseData,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Custom(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Could not generate an unused join code after {0} attempts")]
    JoinCodeExhausted(usize),
}

/// Failures of the key-value store backing the session token
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store contents could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}
