//! Store Module
//!
//! Document-store collaborators for users and posts. Services only see the
//! [`PostStore`] and [`UserStore`] traits; the server picks PostgreSQL when
//! `DATABASE_URL` is configured and the in-memory store otherwise.
//!
//! Each single-document operation is atomic. There are no cross-document
//! transactions.
//!
//! ```text
//! store/
//! ├── mod.rs       - Traits and StoreError
//! ├── postgres.rs  - sqlx / PostgreSQL implementation
//! └── memory.rs    - In-process implementation
//! ```

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::post::Post;

pub mod memory;
pub mod postgres;

pub use memory::{MemoryPostStore, MemoryUserStore};
pub use postgres::{PgPostStore, PgUserStore};

/// Errors raised by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique key (e.g. user e-mail) is already taken
    #[error("duplicate value for {0}")]
    Duplicate(&'static str),
}

/// Post persistence
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Total number of stored posts
    async fn count(&self) -> Result<u64, StoreError>;

    /// Number of posts whose image is `image_url`
    async fn count_by_image_url(&self, image_url: &str) -> Result<u64, StoreError>;

    /// Posts ordered by creation time, newest first
    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    async fn insert(&self, post: &Post) -> Result<(), StoreError>;

    /// Overwrite title, content, image and `updated_at`
    ///
    /// `creator_id` and `created_at` are never rewritten. Returns `false`
    /// if the post no longer exists.
    async fn update(&self, post: &Post) -> Result<bool, StoreError>;

    /// Returns `false` if there was nothing to delete
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// User persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Users for the given ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] if the e-mail is taken
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Returns the updated user, or `None` if it does not exist
    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<User>, StoreError>;
}
