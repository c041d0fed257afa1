use std::fmt;

use chrono::{DateTime, Utc};
use counter_core::Count;

/// A count read from the counting service, applied once and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterResult {
    pub value: Count,
    pub observed_at: DateTime<Utc>,
}

impl CounterResult {
    pub fn observed_now(value: Count) -> Self {
        Self {
            value,
            observed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        self.kind.category()
    }
}

/// Coarse grouping of fetch failures. All of them end in the same error view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// The endpoint could not be reached.
    Transport,
    /// The endpoint answered with a non-2xx status.
    Protocol,
    /// The body could not be turned into a count.
    Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidJson,
    NotAnObject,
    MissingCount,
    InvalidCount { field: &'static str },
}

impl FailureKind {
    pub fn category(&self) -> FailureCategory {
        match self {
            FailureKind::InvalidUrl | FailureKind::Network | FailureKind::Timeout => {
                FailureCategory::Transport
            }
            FailureKind::HttpStatus(_) => FailureCategory::Protocol,
            FailureKind::TooLarge { .. }
            | FailureKind::InvalidJson
            | FailureKind::NotAnObject
            | FailureKind::MissingCount
            | FailureKind::InvalidCount { .. } => FailureCategory::Payload,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidJson => write!(f, "response is not json"),
            FailureKind::NotAnObject => write!(f, "response is not a json object"),
            FailureKind::MissingCount => write!(f, "no count field in response"),
            FailureKind::InvalidCount { field } => {
                write!(f, "field {field} is not a number")
            }
        }
    }
}
