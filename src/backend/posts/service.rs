/**
 * Post Service
 *
 * The post lifecycle: validation, ownership, persistence and change
 * notification. REST handlers and GraphQL resolvers both call into this
 * service; neither touches the stores directly.
 *
 * # Lifecycle
 *
 * ```text
 * (none) ──create──▶ Active ──update──▶ Active ──delete──▶ (gone)
 * ```
 *
 * Every successful write is committed to the store before its change event
 * is published, so a subscriber that sees an event can read the new state.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::sessions::IdentityContext;
use crate::backend::error::BackendError;
use crate::backend::posts::guard::OwnershipGuard;
use crate::backend::posts::images::ImageCleaner;
use crate::backend::realtime::bus::EventBus;
use crate::backend::store::{PostStore, UserStore};
use crate::shared::event::ChangeEvent;
use crate::shared::post::{Creator, DeletedPost, Post, PostDraft, PostPage, PostWithCreator};

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
    bus: EventBus,
    images: ImageCleaner,
    page_size: u32,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserStore>,
        bus: EventBus,
        images: ImageCleaner,
        page_size: u32,
    ) -> Self {
        Self {
            posts,
            users,
            bus,
            images,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// One page of posts, newest first
    ///
    /// `page` is 1-based and defaults to 1.
    pub async fn list(&self, identity: &IdentityContext, page: Option<i64>) -> Result<PostPage, BackendError> {
        identity.require_user()?;

        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(BackendError::invalid_field("page", "Invalid page"));
        }

        let limit = u64::from(self.page_size);
        let skip = (page as u64 - 1).saturating_mul(limit);

        let total_items = self.posts.count().await?;
        let posts = self.posts.find_page(skip, limit).await?;
        let posts = self.with_creators(posts).await?;

        Ok(PostPage { posts, total_items })
    }

    pub async fn get(&self, identity: &IdentityContext, post_id: Uuid) -> Result<PostWithCreator, BackendError> {
        identity.require_user()?;

        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found("No post found"))?;

        self.with_creator(post).await
    }

    /// Create a post owned by the caller
    pub async fn create(&self, identity: &IdentityContext, draft: PostDraft) -> Result<PostWithCreator, BackendError> {
        let user_id = identity.require_user()?;
        draft.validate(true)?;

        let creator = match self.users.find_by_id(user_id).await? {
            Some(user) => user.creator(),
            None => {
                tracing::warn!("Token for unknown user {} used to create a post", user_id);
                return Err(BackendError::NotAuthenticated);
            }
        };

        let post = Post::new(
            draft.title.trim().to_string(),
            draft.content.trim().to_string(),
            draft.image_url.unwrap_or_default().trim().to_string(),
            user_id,
        );
        self.posts.insert(&post).await?;
        tracing::info!("Post {} created by {}", post.id, user_id);

        let view = PostWithCreator { post, creator };
        self.bus.publish(ChangeEvent::created(view.clone(), user_id));
        Ok(view)
    }

    /// Replace title, content and optionally the image of an owned post
    ///
    /// `draft.image_url: None` keeps the stored image. A replaced image is
    /// queued for deletion once the update is committed.
    pub async fn update(
        &self,
        identity: &IdentityContext,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<PostWithCreator, BackendError> {
        let user_id = identity.require_user()?;
        let existing = self.posts.find_by_id(post_id).await?;
        let existing = OwnershipGuard::owned(identity, existing)?;
        draft.validate(false)?;

        let image_url = draft
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| existing.image_url.clone());

        let updated = Post {
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            image_url,
            updated_at: Utc::now(),
            ..existing.clone()
        };

        if !self.posts.update(&updated).await? {
            return Err(BackendError::not_found("No post found"));
        }
        tracing::info!("Post {} updated by {}", post_id, user_id);

        if updated.image_url != existing.image_url {
            self.release_image(&existing.image_url).await;
        }

        let view = self.with_creator(updated).await?;
        self.bus.publish(ChangeEvent::updated(view.clone(), user_id));
        Ok(view)
    }

    /// Delete an owned post and its image
    pub async fn delete(&self, identity: &IdentityContext, post_id: Uuid) -> Result<DeletedPost, BackendError> {
        let user_id = identity.require_user()?;
        let existing = self.posts.find_by_id(post_id).await?;
        let existing = OwnershipGuard::owned(identity, existing)?;

        if !self.posts.delete(post_id).await? {
            return Err(BackendError::not_found("No post found"));
        }
        tracing::info!("Post {} deleted by {}", post_id, user_id);

        self.release_image(&existing.image_url).await;
        self.bus.publish(ChangeEvent::deleted(post_id, user_id));

        Ok(DeletedPost {
            message: "Post removed successfully".to_string(),
            id: post_id,
        })
    }

    /// Queue an image for deletion unless another post still shows it
    ///
    /// Image URLs are client-supplied, so several posts may share one.
    async fn release_image(&self, image_url: &str) {
        match self.posts.count_by_image_url(image_url).await {
            Ok(0) => self.images.schedule(image_url),
            Ok(remaining) => {
                tracing::debug!("Keeping image {} still used by {} post(s)", image_url, remaining);
            }
            Err(e) => tracing::warn!("Cannot check references to {}, keeping it: {}", image_url, e),
        }
    }

    async fn with_creator(&self, post: Post) -> Result<PostWithCreator, BackendError> {
        let creator = self
            .users
            .find_by_id(post.creator_id)
            .await?
            .map(|user| user.creator())
            .unwrap_or_else(|| Creator::missing(post.creator_id));

        Ok(PostWithCreator { post, creator })
    }

    async fn with_creators(&self, posts: Vec<Post>) -> Result<Vec<PostWithCreator>, BackendError> {
        let mut ids: Vec<Uuid> = posts.iter().map(|p| p.creator_id).collect();
        ids.sort();
        ids.dedup();

        let creators: HashMap<Uuid, Creator> = self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.creator()))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let creator = creators
                    .get(&post.creator_id)
                    .cloned()
                    .unwrap_or_else(|| Creator::missing(post.creator_id));
                PostWithCreator { post, creator }
            })
            .collect())
    }
}
