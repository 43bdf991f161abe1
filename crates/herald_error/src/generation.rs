//! Content generation error types.

/// Content generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// Language model API key not found in environment
    MissingApiKey,
    /// Request could not be sent or the body could not be read
    Http(String),
    /// Upstream service answered with a non-success status
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the service
        message: String,
    },
    /// Upstream service did not answer in time
    Timeout,
    /// Response did not contain the required structured fields
    MalformedOutput(String),
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::MissingApiKey => {
                write!(f, "HERALD_LLM_API_KEY environment variable not set")
            }
            GenerationErrorKind::Http(msg) => write!(f, "Generation request failed: {}", msg),
            GenerationErrorKind::Api { status, message } => {
                write!(f, "Generation service returned HTTP {}: {}", status, message)
            }
            GenerationErrorKind::Timeout => write!(f, "Generation service timed out"),
            GenerationErrorKind::MalformedOutput(msg) => {
                write!(f, "Generated content could not be parsed: {}", msg)
            }
        }
    }
}

/// Content generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Timeout);
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GenerationError {}
