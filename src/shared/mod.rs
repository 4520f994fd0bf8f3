//! Shared Module
//!
//! This module contains the types that cross the wire: posts, change events,
//! validation errors and the application configuration. They are used by both
//! the REST and GraphQL surfaces and by the services behind them.

/// Post data structures and validation
pub mod post;

/// Post change events and subscription channels
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use post::{Creator, DeletedPost, Post, PostDraft, PostPage, PostWithCreator};
pub use event::{ChangeEvent, Channel, PostChangePayload, PostDeletePayload, Topic};
pub use error::{FieldError, SharedError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
