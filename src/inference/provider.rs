use std::fmt;

use async_trait::async_trait;

use super::types::{Completion, CompletionRequest};

/// Errors that can occur while asking a provider for a completion.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// No credential configured. Fatal for the session, never retryable.
    Authentication(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
    /// The service answered but produced no choices.
    EmptyResponse,
}

impl CompletionError {
    /// True for failures the user can recover from by re-submitting.
    pub fn is_service_error(&self) -> bool {
        !matches!(self, CompletionError::Authentication(_))
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Authentication(msg) => write!(f, "authentication error: {msg}"),
            CompletionError::Network(msg) => write!(f, "network error: {msg}"),
            CompletionError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CompletionError::Parse(msg) => write!(f, "parse error: {msg}"),
            CompletionError::EmptyResponse => write!(f, "the service returned no choices"),
        }
    }
}

impl std::error::Error for CompletionError {}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends one prompt and waits for the complete response.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_authentication_is_fatal() {
        assert!(!CompletionError::Authentication("missing".into()).is_service_error());
        assert!(CompletionError::Network("timeout".into()).is_service_error());
        assert!(CompletionError::EmptyResponse.is_service_error());
        assert!(
            CompletionError::Api {
                status: 429,
                message: "slow down".into()
            }
            .is_service_error()
        );
    }

    #[test]
    fn test_display_includes_upstream_message() {
        let err = CompletionError::Api {
            status: 500,
            message: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 500): overloaded");
    }
}
