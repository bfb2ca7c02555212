use std::fmt;

use crate::{GeneratedLanding, LandingDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted(Result<GeneratedLanding, ServiceError>),
    PreviewCompleted {
        domain: String,
        result: Result<LandingDocument, ServiceError>,
    },
}

/// A failed service call. `message` is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport-level failures: the service never gave an application answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::InvalidUrl
                | FailureKind::Timeout
                | FailureKind::Network
                | FailureKind::Malformed
                | FailureKind::TooLarge { .. }
        )
    }
}

/// The engine thread is gone and accepts no more work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine has stopped")]
pub struct EngineStopped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The service answered with a non-success status.
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The body was not the JSON shape we expect.
    Malformed,
    /// Retrieval succeeded but carried no markup.
    ContentMissing,
    Network,
    /// The task serving the request died before producing an answer.
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::ContentMissing => write!(f, "content missing"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Internal => write!(f, "internal error"),
        }
    }
}
