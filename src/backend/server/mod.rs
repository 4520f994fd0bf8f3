//! Server Module
//!
//! Application state, database loading and startup wiring.
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── state.rs   - AppState and FromRef impls
//! ├── config.rs  - Database pool and migrations
//! └── init.rs    - Store selection and service wiring
//! ```

pub mod config;

pub mod init;

pub mod state;

pub use init::{build_state, create_app};
pub use state::AppState;
