//! Message-only error types for transport, configuration, and JSON failures.

/// Declares a location-tracked error that carries only a message.
macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            /// Error message
            pub message: String,
            /// Line number where the error occurred
            pub line: u32,
            /// File where the error occurred
            pub file: &'static str,
        }

        impl $name {
            /// Create a new error with the given message at the current location.
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    concat!($label, ": {} at line {} in {}"),
                    self.message, self.line, self.file
                )
            }
        }

        impl std::error::Error for $name {}
    };
}

message_error!(
    /// HTTP transport error (connect, TLS, body read) with source location.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(format!("{}", err).starts_with("HTTP Error: Connection refused"));
    /// ```
    HttpError,
    "HTTP Error"
);

message_error!(
    /// Configuration error (missing env var, unreadable file) with source location.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_error::ConfigError;
    ///
    /// let err = ConfigError::new("HERALD_LLM_API_KEY not set");
    /// assert!(err.message.contains("HERALD_LLM_API_KEY"));
    /// ```
    ConfigError,
    "Configuration Error"
);

message_error!(
    /// JSON serialization/deserialization error with source location.
    JsonError,
    "JSON Error"
);
