use thiserror::Error;

/// Rejections raised while applying a filter; state is left untouched
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Prices cannot be negative")]
    NegativePrice,
    #[error("Min cannot be greater than Max")]
    MinAboveMax,
    #[error("Not a valid price: {0}")]
    InvalidPrice(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// Failure outcomes of a sign-in or sign-up attempt
#[derive(Debug, Error)]
pub enum AuthError {
    /// Non-success status; carries the server message or a generic fallback
    #[error("{0}")]
    Rejected(String),
    #[error("{message}")]
    Network {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Authentication is not configured (API_URL is not set)")]
    NotConfigured,
    #[error("Could not store access token")]
    Storage(#[source] anyhow::Error),
}
