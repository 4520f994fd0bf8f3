/**
 * Ownership Guard
 *
 * The single authorization rule of the feed: only a post's creator may
 * change or delete it.
 */

use crate::backend::auth::sessions::IdentityContext;
use crate::backend::error::BackendError;
use crate::shared::post::Post;

/// Pure ownership check, no I/O
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Check that `identity` may modify `post`
    ///
    /// Checks run in order: authenticated, post exists, caller is the creator.
    pub fn authorize(identity: &IdentityContext, post: Option<&Post>) -> Result<(), BackendError> {
        let user_id = identity.require_user()?;
        let post = post.ok_or_else(|| BackendError::not_found("No post found"))?;

        if !post.is_owned_by(user_id) {
            tracing::warn!("User {} tried to modify post {} owned by {}", user_id, post.id, post.creator_id);
            return Err(BackendError::NotAuthorized);
        }
        Ok(())
    }

    /// Like [`Self::authorize`], handing the post back on success
    pub fn owned(identity: &IdentityContext, post: Option<Post>) -> Result<Post, BackendError> {
        Self::authorize(identity, post.as_ref())?;
        post.ok_or_else(|| BackendError::not_found("No post found"))
    }
}
