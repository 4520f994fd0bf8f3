//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication and user
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! └── user.rs     - Current user profile and status
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /auth/signup - User registration
//! - **`login`** - POST /auth/login - User authentication
//! - **`get_user`** - GET /user - Current user profile
//! - **`update_status`** - PUT /user - Change the current user's status

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Current user handlers
pub mod user;

pub use types::{LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse, StatusRequest};

pub use login::login;
pub use signup::signup;
pub use user::{get_user, update_status};
