// Increase recursion limit for the nested async-graphql derives
#![recursion_limit = "256"]

//! Postfeed - Main Library
//!
//! Backend for a small social feed. Authenticated users create, edit and
//! delete posts; every committed change is pushed to live subscribers.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the wire
//!   - Posts, drafts and validation
//!   - Change events, topics and subscription channels
//!   - Application configuration
//!
//! - **`backend`** - Server-side code
//!   - Axum REST handlers with multipart image uploads
//!   - async-graphql schema with queries, mutations and subscriptions
//!   - JWT authentication and ownership checks
//!   - PostgreSQL and in-memory stores
//!   - Event bus and subscription gateway for SSE/GraphQL fan-out
//!
//! # Usage
//!
//! ```rust,no_run
//! use postfeed::backend::server::init::create_app;
//! use postfeed::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error` holds field-level validation errors
//! - `backend::error::BackendError` maps every failure to an HTTP status and
//!   a GraphQL error with `status` and `data` extensions

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
