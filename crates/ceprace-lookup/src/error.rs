use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

/// CEP lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    /// Missing or malformed postal code
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network failure, including the per-request client timeout
    #[error("Transport error from '{provider}': {message}")]
    TransportError { provider: String, message: String },

    /// Response body is not the provider's JSON shape
    #[error("Decode error from '{provider}': {message}")]
    DecodeError { provider: String, message: String },

    /// Provider does not know the postal code
    #[error("CEP not found by '{provider}'")]
    NotFound { provider: String },

    /// Provider answered with a non-success status
    #[error("Provider '{provider}' API error ({status}): {message}")]
    ProviderApiError {
        provider: String,
        status: u16,
        message: String,
    },

    /// No provider answered within the overall race bound
    #[error("No provider responded within {0:?}")]
    RaceTimeout(Duration),

    /// Every provider failed before any produced an address
    #[error("All providers failed: {}", join(.0))]
    AllProvidersFailed(Vec<LookupError>),

    /// No provider is enabled
    #[error("No CEP providers configured")]
    NoProviders,

    /// Provider request was aborted because the race was decided
    #[error("Request to '{provider}' was cancelled")]
    Cancelled { provider: String },

    /// The caller's shutdown signal fired before the race was decided
    #[error("Lookup interrupted")]
    Interrupted,

    /// A provider task panicked or was aborted unexpectedly
    #[error("Provider task failed: {0}")]
    TaskFailed(String),

    /// Invalid provider or client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LookupError {
    /// Name of the provider the error came from, if any
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::TransportError { provider, .. }
            | Self::DecodeError { provider, .. }
            | Self::NotFound { provider }
            | Self::ProviderApiError { provider, .. }
            | Self::Cancelled { provider } => Some(provider),
            _ => None,
        }
    }
}

fn join(errors: &[LookupError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
