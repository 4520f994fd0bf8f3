//! Backend Error Module
//!
//! This module defines the error type returned by every backend service and
//! its conversions into REST responses and GraphQL errors.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse / ErrorExtensions implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use postfeed::backend::error::BackendError;
//! use axum::response::Response;
//!
//! # async fn example() -> Result<Response, BackendError> {
//! // Handlers can return BackendError directly
//! Err(BackendError::not_found("No post found"))
//! # }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
