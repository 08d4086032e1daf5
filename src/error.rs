//! Domain error types for the admin console.
//!
//! Uses thiserror for ergonomic error handling with automatic Display
//! implementations. All failure branching in the client goes through
//! one result type so the taxonomy (transport vs structured API error
//! vs malformed response) is exhaustive.

use serde::{Deserialize, Serialize};

/// Backend error code for a suite that has never been executed.
const SUITE_NOT_EXECUTED: &str = "Suite not executed";

/// Fallback shown when the backend supplies no message.
pub const GENERIC_FAILURE_MESSAGE: &str = "The request could not be completed";

/// Structured error body returned by the backend on non-success statuses.
///
/// Both fields are optional: a proxy or crash can produce a non-JSON
/// body, which decodes to the empty default (taxonomy case: malformed
/// response shape).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Domain-specific error classification.
///
/// Derived from the structured `error` field, never from exception
/// text, so behavior is stable if message wording changes upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainCode {
    /// The suite has no run to report on yet
    SuiteNotExecuted,
    /// Any other backend error
    Other,
}

impl ErrorBody {
    /// Classify this error body by its structured code.
    pub fn domain_code(&self) -> DomainCode {
        match self.error.as_deref() {
            Some(SUITE_NOT_EXECUTED) => DomainCode::SuiteNotExecuted,
            _ => DomainCode::Other,
        }
    }

    /// The backend-provided message, or the generic fallback.
    pub fn user_message(&self) -> &str {
        self.message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE)
    }
}

/// Client-side errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network-level failure: connect, DNS, hung socket, aborted body
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status with a (possibly empty) structured body
    #[error("API error ({status}): {}", .body.user_message())]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error body; empty default when the body was not JSON
        body: ErrorBody,
    },

    /// Response arrived but did not match the expected shape
    #[error("Unexpected response shape: {0}")]
    Decode(String),

    /// Local file materialization failed (CSV download)
    #[error("Download failed: {0}")]
    Download(String),
}

impl ClientError {
    /// Classify the error by domain code.
    ///
    /// Only structured API errors carry a code; everything else is
    /// [`DomainCode::Other`].
    pub fn domain_code(&self) -> DomainCode {
        match self {
            ClientError::Api { body, .. } => body.domain_code(),
            _ => DomainCode::Other,
        }
    }

    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { body, .. } => body.user_message().to_string(),
            ClientError::Transport(_) | ClientError::Decode(_) | ClientError::Download(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Download(err.to_string())
    }
}

/// Convenience type alias for Results with ClientError.
pub type ClientResult<T> = Result<T, ClientError>;
