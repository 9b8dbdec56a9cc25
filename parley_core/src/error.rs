//! Error taxonomy shared by providers, the answerer and configuration.

use thiserror::Error;

/// Failure of an external provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned an error: {0}")]
    Api(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("no results for '{0}'")]
    NotFound(String),
}

/// Failure of the terminal generation step. Always surfaced to the caller.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("empty response from generation provider")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
