//! Automation loop error types.

/// Automation loop error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoopErrorKind {
    /// Start requested before any configuration was submitted
    ConfigurationMissing,
    /// The loop actor is gone or did not answer
    ActorUnavailable(String),
    /// The run endpoint answered with an error status
    RunFailed {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },
}

impl std::fmt::Display for LoopErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopErrorKind::ConfigurationMissing => {
                write!(f, "No configuration submitted yet; submit a request before starting the loop")
            }
            LoopErrorKind::ActorUnavailable(msg) => write!(f, "Automation actor unavailable: {}", msg),
            LoopErrorKind::RunFailed { status, message } => {
                write!(f, "Run endpoint returned HTTP {}: {}", status, message)
            }
        }
    }
}

/// Automation loop error with source location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{LoopError, LoopErrorKind};
///
/// let err = LoopError::new(LoopErrorKind::ConfigurationMissing);
/// assert!(format!("{}", err).contains("No configuration"));
/// ```
#[derive(Debug, Clone)]
pub struct LoopError {
    /// The kind of error that occurred
    pub kind: LoopErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl LoopError {
    /// Create a new LoopError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LoopErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for LoopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Automation Loop Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for LoopError {}
