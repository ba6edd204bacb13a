//! Fact lookup error types

use thiserror::Error;

/// Fact lookup error with classification
///
/// The classification only feeds diagnostics; the display collapses every
/// kind to the same failure value.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FactError {
    pub kind: FactErrorKind,
    pub message: String,
}

impl FactError {
    pub fn new(kind: FactErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FactErrorKind::Transport, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(FactErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(FactErrorKind::RateLimit, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(FactErrorKind::Server, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FactErrorKind::Decode, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FactErrorKind::Unknown, message)
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::auth(format!("Authentication failed: {body}")),
            429 => Self::rate_limit(format!("Rate limited: {body}")),
            500..=599 => Self::server(format!("Server error: {body}")),
            _ => Self::unknown(format!("HTTP {status}: {body}")),
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactErrorKind {
    /// Network, DNS or TLS failure
    Transport,
    /// Missing or rejected API key (401, 403)
    Auth,
    /// Quota exhausted (429)
    RateLimit,
    /// Provider failure (5xx)
    Server,
    /// Body could not be read as text
    Decode,
    Unknown,
}
