/**
 * In-Memory Store
 *
 * Process-local implementations of `PostStore` and `UserStore`, used when no
 * `DATABASE_URL` is configured and throughout the test suite.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::store::{PostStore, StoreError, UserStore};
use crate::shared::post::Post;

/// Posts kept in insertion order
#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn count_by_image_url(&self, image_url: &str) -> Result<u64, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| p.image_url == image_url).count() as u64)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;

        // Reverse insertion order first so equal timestamps list newest-inserted first
        let mut ordered: Vec<&Post> = posts.iter().rev().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(ordered
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(StoreError::Duplicate("id"));
        }
        posts.push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(stored) => {
                stored.title = post.title.clone();
                stored.content = post.content.clone();
                stored.image_url = post.image_url.clone();
                stored.updated_at = post.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}

/// Users indexed by id
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email"));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.status = status.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}
