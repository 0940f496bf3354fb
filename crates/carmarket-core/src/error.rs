//! Core error types for the carmarket client.
//!
//! The error taxonomy mirrors the three terminal outcomes of a form submit:
//! validation failures (local, never reach the network), transport failures
//! (generic user message), and API failures (server-reported message passed
//! through when available). A handful of supporting variants cover session
//! persistence, configuration, and serialization.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-field error lists).
///
/// # Examples
///
/// ```
/// use carmarket_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("This field is required.", "required");
///
/// // Field-level validation errors
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert(
///     "email".to_string(),
///     vec![ValidationError::new("Please enter a valid email!", "invalid")],
/// );
/// let err = ValidationError::with_field_errors(field_errors);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "required", "invalid").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if this error carries per-field errors.
    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for the carmarket client.
///
/// Every submit attempt terminates in at most one of these; none are
/// retried automatically. Form state stays editable after any of them.
#[derive(Error, Debug)]
pub enum CarmarketError {
    /// A local validation failure. Never reaches the network.
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    /// A transport-level failure (no connectivity, refused connection,
    /// malformed URL). Surfaced to the user as a generic message.
    #[error("Network error: {0}")]
    Network(String),

    /// The server responded with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The message extracted from the response body, or a generic one.
        message: String,
    },

    /// A session store failure (I/O error or a corrupt persisted record).
    #[error("Session error: {0}")]
    Session(String),

    /// A settings file or environment variable could not be parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A payload or persisted record failed to (de)serialize.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A submit was rejected because a prior submission on the same form
    /// instance has not yet resolved.
    #[error("A submission is already in flight for this form")]
    InFlight,
}

impl CarmarketError {
    /// Convenience constructor for a simple validation error.
    pub fn validation(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message, code))
    }

    /// Returns `true` for errors that are resolved locally, without any
    /// network call having been made.
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InFlight)
    }
}

impl From<ValidationError> for CarmarketError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Result alias used throughout the carmarket crates.
pub type CarmarketResult<T> = Result<T, CarmarketError>;
