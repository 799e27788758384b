// --- File: crates/slotwise_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Slotwise errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for SlotwiseError.
#[derive(Error, Debug)]
pub enum SlotwiseError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a conflict (e.g., two bookings claiming the same slot)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SlotwiseError {
    fn status_code(&self) -> u16 {
        match self {
            SlotwiseError::ParseError(_) => 400,
            SlotwiseError::ConfigError(_) => 500,
            SlotwiseError::ValidationError(_) => 400,
            SlotwiseError::ConflictError(_) => 409,
            SlotwiseError::NotFoundError(_) => 404,
            SlotwiseError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<serde_json::Error> for SlotwiseError {
    fn from(err: serde_json::Error) -> Self {
        SlotwiseError::ParseError(err.to_string())
    }
}

impl From<chrono::ParseError> for SlotwiseError {
    fn from(err: chrono::ParseError) -> Self {
        SlotwiseError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SlotwiseError {
    SlotwiseError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> SlotwiseError {
    SlotwiseError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SlotwiseError {
    SlotwiseError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> SlotwiseError {
    SlotwiseError::ConflictError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> SlotwiseError {
    SlotwiseError::InternalError(message.to_string())
}
