use thiserror::Error;

/// Errors that can occur within a [`StockDataSource`](super::StockDataSource) implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure: connection refused, timeout, broken body.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The envelope decoded but reported `success: false`.
    #[error("API reported failure: {0}")]
    Unsuccessful(String),

    /// The body was not an envelope, or its payload had the wrong shape.
    #[error("Malformed API response: {0}")]
    Decode(String),

    /// The request was rejected before being sent.
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Failed to init the reqwest client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
