//! Posts Module
//!
//! The feed itself: post lifecycle, ownership rule, image files and the REST
//! handlers.
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs      - Module exports and documentation
//! ├── guard.rs    - OwnershipGuard
//! ├── images.rs   - Upload storage and background cleanup
//! ├── service.rs  - PostService (list, get, create, update, delete)
//! └── handlers.rs - REST handlers under /feed and /post-image
//! ```

pub mod guard;
pub mod handlers;
pub mod images;
pub mod service;

pub use guard::OwnershipGuard;
pub use images::{FilenameStrategy, ImageCleaner, ImageStore, ImageUpload, UploadConfig};
pub use service::PostService;
