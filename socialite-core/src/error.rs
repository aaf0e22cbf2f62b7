use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur while talking to an identity provider.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A caller-supplied argument is missing or invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The provider answered with a non-zero error code
    #[error("Provider error: {0}")]
    Provider(ProviderError),
    /// The request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),
    /// The response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
    /// The operation is not offered by this provider
    #[error("{0} is not supported by this provider")]
    Unsupported(&'static str),
    /// The CSRF state parameter does not match the expected value
    #[error("CSRF state mismatch")]
    CsrfMismatch,
}

impl AuthError {
    /// The provider-reported error, if this is one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            AuthError::Provider(err) => Some(err),
            _ => None,
        }
    }

    /// Wraps a decode failure together with what was being decoded.
    pub fn decode(context: &str, err: impl fmt::Display) -> Self {
        AuthError::Decode(format!("{}: {}", context, err))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

/// An error code and message reported by the provider in its response body.
///
/// QQ, WeChat and Weibo all answer with HTTP 200 and put the failure in the
/// payload, each under different field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    /// The provider's numeric error code, never zero.
    pub code: i64,
    /// A human-readable description of the error.
    pub message: String,
}

impl ProviderError {
    /// Creates a new provider error.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message.trim(), self.code)
    }
}
