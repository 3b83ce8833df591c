use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch recommendations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// Endpoint unreachable, connection dropped, or timed out.
    Transport,
    /// The service answered but reported a failure.
    Service,
    /// The body did not match the recommendation shape.
    MalformedResponse,
}

/// Failure of one submission. Only the message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    kind: RequestErrorKind,
    message: String,
}

impl RequestError {
    pub fn new(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Transport, message)
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Service, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::MalformedResponse, message)
    }

    pub fn kind(&self) -> RequestErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Body the service returns when it reports a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}
