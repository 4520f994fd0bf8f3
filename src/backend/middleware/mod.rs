//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`auth`** - Attaches an `IdentityContext` to every request
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use postfeed::backend::auth::TokenAuthenticator;
//! use postfeed::backend::middleware::authentication;
//!
//! # fn example(tokens: TokenAuthenticator) {
//! let app: Router = Router::new()
//!     .layer(middleware::from_fn_with_state(tokens, authentication));
//! # }
//! ```

pub mod auth;

pub use auth::{auth_header, authentication, Identity, AUTH_HEADER};
