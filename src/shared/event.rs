/**
 * Post Change Events
 *
 * This module defines the events produced when a post is created, updated
 * or deleted, and the client-facing channels those events are grouped into.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::post::PostWithCreator;

/// Event category on the bus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    PostCreated,
    PostUpdated,
    PostDeleted,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::PostCreated, Topic::PostUpdated, Topic::PostDeleted];

    /// Action name used in client payloads
    pub fn action(self) -> &'static str {
        match self {
            Topic::PostCreated => "create",
            Topic::PostUpdated => "update",
            Topic::PostDeleted => "delete",
        }
    }
}

/// A change to a post, produced after the write has committed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub topic: Topic,
    /// Full post for create/update; `None` once the post is gone
    pub post: Option<PostWithCreator>,
    pub post_id: Uuid,
    pub actor_user_id: Uuid,
}

impl ChangeEvent {
    pub fn created(post: PostWithCreator, actor_user_id: Uuid) -> Self {
        Self {
            topic: Topic::PostCreated,
            post_id: post.post.id,
            post: Some(post),
            actor_user_id,
        }
    }

    pub fn updated(post: PostWithCreator, actor_user_id: Uuid) -> Self {
        Self {
            topic: Topic::PostUpdated,
            post_id: post.post.id,
            post: Some(post),
            actor_user_id,
        }
    }

    pub fn deleted(post_id: Uuid, actor_user_id: Uuid) -> Self {
        Self {
            topic: Topic::PostDeleted,
            post: None,
            post_id,
            actor_user_id,
        }
    }
}

/// Client-facing grouping of topics
///
/// `changePost` fuses creation and update, `deletePost` carries deletions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Channel {
    #[serde(rename = "changePost")]
    ChangePost,
    #[serde(rename = "deletePost")]
    DeletePost,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::ChangePost, Channel::DeletePost];

    /// Topics delivered on this channel
    pub fn topics(self) -> &'static [Topic] {
        match self {
            Channel::ChangePost => &[Topic::PostCreated, Topic::PostUpdated],
            Channel::DeletePost => &[Topic::PostDeleted],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::ChangePost => "changePost",
            Channel::DeletePost => "deletePost",
        }
    }

    /// Parse a channel name as clients send it (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "changepost" => Some(Channel::ChangePost),
            "deletepost" => Some(Channel::DeletePost),
            _ => None,
        }
    }

    /// Channel an event belongs to
    pub fn for_topic(topic: Topic) -> Self {
        match topic {
            Topic::PostCreated | Topic::PostUpdated => Channel::ChangePost,
            Topic::PostDeleted => Channel::DeletePost,
        }
    }
}

/// Payload pushed on `changePost`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostChangePayload {
    pub post: PostWithCreator,
    pub action: String,
    pub user_id: Uuid,
}

/// Payload pushed on `deletePost`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDeletePayload {
    pub id: Uuid,
}
