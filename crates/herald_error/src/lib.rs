//! Error types for Herald.
//!
//! Every error domain is a struct that records the file and line where it was
//! created. Domain errors convert into [`HeraldError`] so that binaries and the
//! HTTP layer can handle a single type.

mod automation;
mod generation;
mod message;
mod publish;
mod validation;

pub use automation::{LoopError, LoopErrorKind};
pub use generation::{GenerationError, GenerationErrorKind};
pub use message::{ConfigError, HttpError, JsonError};
pub use publish::{PublishError, PublishErrorKind, PublishResult};
pub use validation::ValidationError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum HeraldErrorKind {
    /// HTTP transport error
    Http(HttpError),
    /// JSON serialization/deserialization error
    Json(JsonError),
    /// Configuration error
    Config(ConfigError),
    /// Inbound request failed schema validation
    Validation(ValidationError),
    /// Content generation failed
    Generation(GenerationError),
    /// Platform publishing failed
    Publish(PublishError),
    /// Automation loop error
    Loop(LoopError),
}

impl std::fmt::Display for HeraldErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeraldErrorKind::Http(e) => write!(f, "{}", e),
            HeraldErrorKind::Json(e) => write!(f, "{}", e),
            HeraldErrorKind::Config(e) => write!(f, "{}", e),
            HeraldErrorKind::Validation(e) => write!(f, "{}", e),
            HeraldErrorKind::Generation(e) => write!(f, "{}", e),
            HeraldErrorKind::Publish(e) => write!(f, "{}", e),
            HeraldErrorKind::Loop(e) => write!(f, "{}", e),
        }
    }
}

/// Herald error with kind discrimination.
#[derive(Debug)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }

    /// Consume the error, returning its kind.
    pub fn into_kind(self) -> HeraldErrorKind {
        *self.0
    }
}

impl std::fmt::Display for HeraldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Herald Error: {}", self.0)
    }
}

impl std::error::Error for HeraldError {}

// Generic From implementation for any type that converts to HeraldErrorKind
impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_convert_into_herald_error() {
        let err: HeraldError = GenerationError::new(GenerationErrorKind::Timeout).into();
        assert!(matches!(err.kind(), HeraldErrorKind::Generation(_)));
        assert!(err.to_string().starts_with("Herald Error: Generation Error"));

        let err: HeraldError = ValidationError::new(vec!["topic: Required".into()]).into();
        match err.into_kind() {
            HeraldErrorKind::Validation(v) => assert!(v.mentions("topic")),
            other => panic!("unexpected kind: {other}"),
        }
    }
}
