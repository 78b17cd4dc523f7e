//! Custom error types for the common library
//!
//! This module defines the error taxonomy shared by every client crate:
//! validation errors raised before a request is sent, HTTP errors carrying
//! the server message, the global session-expired case, and the storage and
//! configuration errors underneath them.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Message shown when nothing more specific can be extracted from an error
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation failures collected for a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding a single error
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record an error for a field
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record the error of a field check, if any
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    /// First error recorded for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Custom error type for key/value storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file could not be read or written
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a JSON object of strings
    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// A previous holder of the storage lock panicked
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Custom error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A URL setting could not be parsed
    #[error("Invalid URL in {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },

    /// A numeric setting could not be parsed
    #[error("Invalid value in {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Custom error type for every client operation
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// 401 received outside the login view; tokens were cleared
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    /// Non-2xx response
    #[error("Request failed with status code {status}")]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Response body did not match the expected type
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Response body matched neither envelope shape
    #[error("Unexpected response shape, expected one of: {}", .expected.join(", "))]
    UnexpectedResponse { expected: Vec<String> },

    /// Token persistence failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Local file could not be read
    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// The message to show the user inline and in a toast
    ///
    /// HTTP errors prefer the server message; every other error uses its own
    /// display text. An empty message falls back to a generic one.
    pub fn user_message(&self) -> String {
        let message = match self {
            ClientError::Http {
                server_message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Field errors, if this is a validation failure
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Extract the server-provided error message from a response body
///
/// Looks at `message` first (taking the first element when it is an array),
/// then at `error`. Empty strings are ignored.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let from_message = match body.get("message") {
        Some(Value::Array(items)) => items.first().and_then(message_text),
        Some(value) => message_text(value),
        None => None,
    };

    from_message.or_else(|| body.get("error").and_then(message_text))
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map.get("message").and_then(message_text),
        _ => None,
    }
}
