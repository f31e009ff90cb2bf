//! @ai:module:intent Typed errors for provider calls and startup configuration
//! @ai:module:layer domain
//! @ai:module:public_api ProviderError, ConfigError
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Failure of a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} not set in environment")]
    MissingApiKey(&'static str),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("provider returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// @ai:intent Whether a retry has a chance of succeeding
    /// @ai:effects pure
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport(_) | ProviderError::EmptyResponse => true,
            ProviderError::Status { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            ProviderError::MissingApiKey(_) | ProviderError::MalformedResponse(_) => false,
        }
    }
}

/// @ai:intent Startup errors that abort the process before any provider call
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}.json not found")]
    DatasetNotFound(String),

    #[error("invalid dataset {path}: {reason}")]
    InvalidDataset { path: PathBuf, reason: String },

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("unknown model '{model}'{}", available_hint(.available))]
    UnknownModel {
        model: String,
        available: Vec<String>,
    },

    #[error("invalid question range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("concurrency must be at least 1")]
    InvalidConcurrency,
}

fn available_hint(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" (available: {})", available.join(", "))
    }
}
