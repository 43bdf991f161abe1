//! Request validation error types.

/// A rejected automation request and every rule it failed.
///
/// Each detail has the form `"<field path>: <message>"`, one per failed rule,
/// so callers can render the full list rather than only the first problem.
///
/// # Examples
///
/// ```
/// use herald_error::ValidationError;
///
/// let err = ValidationError::new(vec!["topic: Required".to_string()]);
/// assert_eq!(err.details.len(), 1);
/// assert!(format!("{}", err).contains("topic: Required"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// One entry per failed field or schema rule
    pub details: Vec<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(details: Vec<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            details,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether any detail mentions the given field path.
    pub fn mentions(&self, field: &str) -> bool {
        self.details.iter().any(|d| d.contains(field))
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Validation Error: Invalid payload ({}) at line {} in {}",
            self.details.join("; "),
            self.line,
            self.file
        )
    }
}

impl std::error::Error for ValidationError {}
