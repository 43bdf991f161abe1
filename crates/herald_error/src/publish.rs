//! Platform publishing error types.
//!
//! These never cross a publisher boundary: publishers convert them into a
//! failed platform result. They exist so the adapters can use `?` internally.

use std::fmt;

/// Publishing error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublishErrorKind {
    /// Request could not be sent or the body could not be read.
    Http(String),

    /// Platform API rejected the call (expired token, missing permission, rate limit).
    Api {
        /// HTTP status code
        status: u16,
        /// Upstream error message
        message: String,
    },

    /// Platform answered successfully but without the identifier we need.
    MissingIdentifier(String),

    /// Publisher was handed another platform's credential.
    CredentialMismatch(String),
}

impl fmt::Display for PublishErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "request failed: {msg}"),
            Self::Api { status, message } => write!(f, "HTTP {status}: {message}"),
            Self::MissingIdentifier(what) => write!(f, "response missing {what}"),
            Self::CredentialMismatch(msg) => write!(f, "credential mismatch: {msg}"),
        }
    }
}

/// Publishing error with source location tracking.
#[derive(Debug, Clone)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use herald_error::{PublishError, PublishErrorKind};
    ///
    /// let err = PublishError::new(PublishErrorKind::Api {
    ///     status: 190,
    ///     message: "Invalid OAuth access token".to_string(),
    /// });
    /// assert!(err.kind.to_string().contains("Invalid OAuth"));
    /// ```
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Publish Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for PublishError {}

/// Result type for publishing operations.
pub type PublishResult<T> = Result<T, PublishError>;
