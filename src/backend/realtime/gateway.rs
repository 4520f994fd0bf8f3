/**
 * Subscription Gateway
 *
 * Binds client connections (SSE streams, GraphQL websocket subscriptions) to
 * event bus subscriptions and turns change events into client payloads.
 *
 * # Channels
 *
 * - `changePost` - post created or updated, payload `{ post, action, userId }`
 * - `deletePost` - post deleted, payload `{ id }`
 *
 * A connection holds one bus subscription per channel. Closing it, or just
 * dropping it when the client goes away, releases all of them.
 */

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_util::stream::{self, BoxStream, StreamExt};
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::realtime::bus::{EventBus, SubscriptionId};
use crate::shared::event::{ChangeEvent, Channel, PostChangePayload, PostDeletePayload, Topic};

/// Identifier of one client connection
pub type ConnectionId = Uuid;

/// A serialized notification as sent to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload")]
pub enum GatewayMessage {
    #[serde(rename = "changePost")]
    ChangePost(PostChangePayload),
    #[serde(rename = "deletePost")]
    DeletePost(PostDeletePayload),
}

impl GatewayMessage {
    /// Client payload for a bus event
    ///
    /// Returns `None` for a create/update event that carries no post.
    pub fn from_event(event: ChangeEvent) -> Option<Self> {
        match event.topic {
            Topic::PostCreated | Topic::PostUpdated => {
                let post = event.post?;
                Some(GatewayMessage::ChangePost(PostChangePayload {
                    post,
                    action: event.topic.action().to_string(),
                    user_id: event.actor_user_id,
                }))
            }
            Topic::PostDeleted => Some(GatewayMessage::DeletePost(PostDeletePayload {
                id: event.post_id,
            })),
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            GatewayMessage::ChangePost(_) => Channel::ChangePost,
            GatewayMessage::DeletePost(_) => Channel::DeletePost,
        }
    }

    /// JSON of the payload alone, without the channel tag
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        match self {
            GatewayMessage::ChangePost(payload) => serde_json::to_string(payload),
            GatewayMessage::DeletePost(payload) => serde_json::to_string(payload),
        }
    }
}

/// Per-connection subscription manager
#[derive(Clone)]
pub struct SubscriptionGateway {
    bus: EventBus,
    connections: Arc<Mutex<HashMap<ConnectionId, Vec<SubscriptionId>>>>,
}

impl SubscriptionGateway {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn connections(&self) -> MutexGuard<'_, HashMap<ConnectionId, Vec<SubscriptionId>>> {
        self.connections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a connection listening on `channels`
    ///
    /// Duplicate channels are subscribed once.
    pub fn open(&self, channels: &[Channel]) -> GatewayConnection {
        let id = Uuid::new_v4();

        let mut unique: Vec<Channel> = Vec::with_capacity(channels.len());
        for channel in channels {
            if !unique.contains(channel) {
                unique.push(*channel);
            }
        }

        let subscriptions: Vec<_> = unique
            .iter()
            .map(|channel| self.bus.subscribe_many(channel.topics()))
            .collect();
        let subscription_ids = subscriptions.iter().map(|s| s.id()).collect();
        self.connections().insert(id, subscription_ids);

        tracing::info!("[Gateway] Connection {} opened on {:?}", id, unique);

        let messages = stream::select_all(subscriptions)
            .filter_map(|event| async move { GatewayMessage::from_event(event) })
            .boxed();

        GatewayConnection {
            id,
            channels: unique,
            messages,
            gateway: self.clone(),
        }
    }

    /// Close a connection and release its subscriptions; idempotent
    pub fn close(&self, id: ConnectionId) {
        let released = self.connections().remove(&id);
        if let Some(subscription_ids) = released {
            for subscription_id in subscription_ids {
                self.bus.unsubscribe(subscription_id);
            }
            tracing::info!("[Gateway] Connection {} closed", id);
        }
    }

    /// Number of open connections
    pub fn active_connections(&self) -> usize {
        self.connections().len()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

/// A client connection, consumed as a stream of messages
pub struct GatewayConnection {
    id: ConnectionId,
    channels: Vec<Channel>,
    messages: BoxStream<'static, GatewayMessage>,
    gateway: SubscriptionGateway,
}

impl GatewayConnection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

impl Stream for GatewayConnection {
    type Item = GatewayMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.messages.poll_next_unpin(cx)
    }
}

impl Drop for GatewayConnection {
    fn drop(&mut self) {
        self.gateway.close(self.id);
    }
}
