use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Timeout,
    UnexpectedStatus,
    Unexpected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Connection => "connection error",
            FailureKind::Timeout => "timeout",
            FailureKind::UnexpectedStatus => "unexpected status",
            FailureKind::Unexpected => "unexpected error",
        };
        f.write_str(label)
    }
}

/// A classified probe failure. Transport errors, bad statuses and malformed
/// bodies all end up here so a probe never has to deal with raw `reqwest`
/// errors.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: FailureKind,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Connection, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    pub fn unexpected_status(message: impl Into<String>) -> Self {
        Self::new(FailureKind::UnexpectedStatus, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unexpected, message)
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::timeout(err.to_string())
        } else if err.is_connect() {
            ProbeError::connection(err.to_string())
        } else {
            ProbeError::unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::unexpected(format!("malformed JSON: {err}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unknown environment '{0}'. Expected one of: local, production")]
    UnknownEnvironment(String),
    #[error("Invalid base URL for {service}: '{url}' ({reason})")]
    InvalidUrl {
        service: String,
        url: String,
        reason: String,
    },
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Validation error: {0}")]
    Invalid(String),
}
