//! GraphQL input and output types
//!
//! Object ids are exposed as `_id` to match the REST payloads.

use async_graphql::{InputObject, SimpleObject, ID};

use crate::backend::auth::users::User;
use crate::shared::event::{PostChangePayload, PostDeletePayload};
use crate::shared::post::{Creator, PostPage, PostWithCreator};

#[derive(InputObject, Debug, Clone)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(InputObject, Debug, Clone)]
pub struct SignupData {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Post fields for create and update
///
/// `imageUrl` comes from a prior `PUT /post-image` upload. It is required on
/// create; on update leaving it out keeps the current image.
#[derive(InputObject, Debug, Clone)]
pub struct PostData {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "User")]
pub struct UserObject {
    #[graphql(name = "_id")]
    pub id: ID,
    pub email: String,
    pub name: String,
    pub status: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            email: user.email,
            name: user.name,
            status: user.status,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Creator")]
pub struct CreatorObject {
    #[graphql(name = "_id")]
    pub id: ID,
    pub name: String,
}

impl From<Creator> for CreatorObject {
    fn from(creator: Creator) -> Self {
        Self {
            id: ID(creator.id.to_string()),
            name: creator.name,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Post")]
pub struct PostObject {
    #[graphql(name = "_id")]
    pub id: ID,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: CreatorObject,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostWithCreator> for PostObject {
    fn from(view: PostWithCreator) -> Self {
        let post = view.post;
        Self {
            id: ID(post.id.to_string()),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator: view.creator.into(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct Posts {
    pub posts: Vec<PostObject>,
    pub total_items: u64,
}

impl From<PostPage> for Posts {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.posts.into_iter().map(PostObject::from).collect(),
            total_items: page.total_items,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct AuthUser {
    pub token: String,
    pub user_id: ID,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct NewUser {
    pub user: ID,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct MsgRes {
    pub message: String,
    pub id: ID,
}

/// Payload of the `changePost` subscription
#[derive(SimpleObject, Debug, Clone)]
pub struct PostChange {
    pub post: PostObject,
    /// `create` or `update`
    pub action: String,
    pub user_id: ID,
}

impl From<PostChangePayload> for PostChange {
    fn from(payload: PostChangePayload) -> Self {
        Self {
            post: payload.post.into(),
            action: payload.action,
            user_id: ID(payload.user_id.to_string()),
        }
    }
}

/// Payload of the `deletePost` subscription
#[derive(SimpleObject, Debug, Clone)]
pub struct DeletedPostId {
    pub id: ID,
}

impl From<PostDeletePayload> for DeletedPostId {
    fn from(payload: PostDeletePayload) -> Self {
        Self {
            id: ID(payload.id.to_string()),
        }
    }
}
