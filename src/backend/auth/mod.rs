//! Authentication Module
//!
//! This module handles user registration, login and session tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model
//! ├── sessions.rs     - Token issuing/verification, IdentityContext
//! ├── service.rs      - AuthService (signup, login, profile)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email, name and password → user created
//! 2. **Login**: email and password verified → token returned
//! 3. **Requests**: `Authentication: Bearer <token>` → `IdentityContext`
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs signed with the shared `JWT_SECRET`
//! - Tokens expire after the configured TTL (3 hours by default)

/// User data model
pub mod users;

/// Token generation and validation
pub mod sessions;

/// Registration and login logic
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use service::{AuthService, LoginOutcome};
pub use sessions::{Claims, IdentityContext, TokenAuthenticator};
pub use users::{User, UserProfile};
