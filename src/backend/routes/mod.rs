//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! ├── feed_routes.rs  - Posts, uploads, SSE
//! └── api_routes.rs   - Auth and user endpoints
//! ```

/// Main router creation
pub mod router;

/// Feed route handlers
pub mod feed_routes;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
