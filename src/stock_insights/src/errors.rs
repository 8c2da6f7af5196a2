use thiserror::Error;

use crate::{
    config::ConfigError,
    preferences::PreferenceError,
    providers::ProviderInitError,
};

/// The unified error type for the `stock_insights` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The data source could not be constructed.
    #[error(transparent)]
    ProviderInit(#[from] ProviderInitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// A view finished in the failed state; carries the view's message.
    #[error("{0}")]
    Load(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
