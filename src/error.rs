//! Error types for the compose codec
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The first four variants are the codec taxonomy. Every one of them is an
//! ordinary value the caller is expected to branch on; none of them means the
//! host process should stop.

use thiserror::Error;

/// The main error type for the compose codec
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Codec Errors
    // ============================================================================
    /// No registered shape structurally matches the payload
    #[error("Unrecognized compose payload format")]
    UnrecognizedFormat,

    /// A shape matched but a required field was absent at its declared path
    #[error("Missing field '{field}' in {version} payload")]
    MissingField { field: String, version: String },

    /// A shape matched but a value at a declared path had an unexpected type
    #[error("Malformed {version} payload at '{path}': {message}")]
    MalformedPayload {
        version: String,
        path: String,
        message: String,
    },

    /// The operation does not apply to this kind of payload
    #[error("Not applicable: {message}")]
    NotApplicable { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>, version: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            version: version.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed(
        version: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedPayload {
            version: version.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not-applicable error
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::NotApplicable {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error means a shape matched but its table no longer fits
    /// the payload.
    ///
    /// Callers should log these separately from `UnrecognizedFormat`: they
    /// point at a shape table that has drifted from the backend.
    pub fn is_shape_drift(&self) -> bool {
        matches!(
            self,
            Error::MissingField { .. } | Error::MalformedPayload { .. }
        )
    }

    /// Whether the caller should fall back to treating the payload as opaque
    pub fn is_opaque_payload(&self) -> bool {
        matches!(self, Error::UnrecognizedFormat | Error::NotApplicable { .. })
    }
}

/// Result type alias for the compose codec
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
