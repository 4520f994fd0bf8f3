//! Shared Error Types
//!
//! This module defines the validation error types shared by every surface
//! (REST, GraphQL and the services behind them).
//!
//! # Error Categories
//!
//! - `ValidationError` - one or more fields failed validation
//!
//! # Usage
//!
//! ```rust
//! use postfeed::shared::error::{FieldError, SharedError};
//!
//! let error = SharedError::validation(vec![FieldError::new("title", "Invalid title")]);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated field, reported back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field as the client sent it
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error, carrying every violated field
    #[error("Invalid input data")]
    ValidationError {
        /// All field violations found in the input
        errors: Vec<FieldError>,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }

    /// Collapse a list of field violations into `Ok(())` when empty
    pub fn check(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::validation(errors))
        }
    }
}
