/**
 * Post Data Structures
 *
 * Posts as they are stored (`Post`), as they are returned to clients with
 * their creator resolved (`PostWithCreator`), and as they arrive from clients
 * (`PostDraft`).
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{FieldError, SharedError};

/// Minimum number of characters for a post title or body, after trimming
pub const MIN_TEXT_LENGTH: usize = 5;

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Relative path of the attached image, e.g. `images/<uuid>-cat.png`
    pub image_url: String,
    /// Owner of the post, fixed at creation
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `creator_id`
    pub fn new(title: String, content: String, image_url: String, creator_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            image_url,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if `user_id` owns this post
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}

/// Public view of a post's creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

impl Creator {
    /// Placeholder for a creator whose account no longer resolves
    pub fn missing(id: Uuid) -> Self {
        Self {
            id,
            name: "[deleted]".to_string(),
        }
    }
}

/// A post with its creator populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithCreator {
    #[serde(flatten)]
    pub post: Post,
    pub creator: Creator,
}

/// Post fields submitted by a client for create or update
///
/// On update `image_url: None` keeps the stored image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url,
        }
    }

    /// Validate the draft, reporting every violated field
    ///
    /// `require_image` is set for creation, where a post without an image
    /// is rejected.
    pub fn validate(&self, require_image: bool) -> Result<(), SharedError> {
        let mut errors = Vec::new();

        if !has_min_length(&self.title, MIN_TEXT_LENGTH) {
            errors.push(FieldError::new("title", "Invalid title"));
        }
        if !has_min_length(&self.content, MIN_TEXT_LENGTH) {
            errors.push(FieldError::new("content", "Invalid content"));
        }
        let image_missing = self
            .image_url
            .as_deref()
            .map(|url| url.trim().is_empty())
            .unwrap_or(true);
        if require_image && image_missing {
            errors.push(FieldError::new("image", "No image provided"));
        }

        SharedError::check(errors)
    }
}

/// Check if `value` has at least `min` characters once trimmed
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// One page of posts together with the total number of stored posts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<PostWithCreator>,
    pub total_items: u64,
}

/// Confirmation returned after a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedPost {
    pub message: String,
    pub id: Uuid,
}
