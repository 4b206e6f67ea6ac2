//! Error Types for the License Client

use license_core::LicenseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Normalized client error
///
/// Transport failures, HTTP failures and failures embedded in a 2xx body all
/// end up here with a human-readable message where the server supplied one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network, DNS or timeout failure; no response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP status >= 400
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// HTTP success whose body carries `statusCode >= 400`
    #[error("Request rejected ({status_code}): {message}")]
    Application { status_code: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] LicenseError),
}

impl ClientError {
    /// Check if the same request may succeed when sent again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Http { .. } | ClientError::Application { .. }
        )
    }

    /// Status reported by the server, from either the HTTP layer or the body
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Application { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message for a toast. Server messages win; everything else gets
    /// `fallback` (e.g. "Failed to renew license").
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Http { message, .. } | ClientError::Application { message, .. } => {
                message.clone()
            }
            ClientError::Domain(err) => err.user_message(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let err = ClientError::Application {
            status_code: 422,
            message: "Package sold out".into(),
        };
        assert_eq!(err.user_message("Failed to renew license"), "Package sold out");
    }

    #[test]
    fn test_transport_uses_fallback() {
        let err = ClientError::Transport("connection refused".into());
        assert_eq!(
            err.user_message("Failed to delete license"),
            "Failed to delete license"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_decode_not_retryable() {
        assert!(!ClientError::Decode("bad".into()).is_retryable());
        assert!(!ClientError::Config("bad".into()).is_retryable());
    }
}
