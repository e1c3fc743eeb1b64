//! Unified error types for the search proxy.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the search proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Upstream API error.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors raised while talking to an upstream search API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request never produced a response.
    #[error("{service} request failed: {source}")]
    Http {
        /// Upstream service name.
        service: &'static str,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        /// Upstream service name.
        service: &'static str,
        /// Response status.
        status: StatusCode,
        /// Response body, as text.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode {service} response: {reason}")]
    Decode {
        /// Upstream service name.
        service: &'static str,
        /// Decoder message.
        reason: String,
    },
}

impl UpstreamError {
    /// Name of the upstream service that failed.
    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::Http { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Decode { service, .. } => service,
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ProxyError>;
