/**
 * Event Bus
 *
 * In-process publish/subscribe for post change events. The bus is created
 * once at startup and injected into the services that publish and the
 * gateway that subscribes.
 *
 * # Delivery
 *
 * - `publish` delivers to every subscriber registered for the event's topic
 *   at the moment of the call; nobody listening is not an error
 * - each subscriber has its own bounded queue; a full queue drops the event
 *   for that subscriber only
 * - a single publisher's events arrive in order on each subscriber
 * - there is no persistence and no replay
 */

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::shared::event::{ChangeEvent, Topic};

/// Identifier of one registered subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct Subscriber {
    topics: Vec<Topic>,
    tx: mpsc::Sender<ChangeEvent>,
}

struct Registry {
    subscribers: Mutex<HashMap<SubscriptionId, Subscriber>>,
    next_id: AtomicU64,
    capacity: usize,
}

/// Topic-based event bus
///
/// Cloning is cheap; all clones share one registry.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Registry>,
}

impl EventBus {
    /// Create a bus whose subscribers buffer up to `capacity` events each
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Registry {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                capacity: capacity.max(1),
            }),
        }
    }

    fn subscribers(&self) -> MutexGuard<'_, HashMap<SubscriptionId, Subscriber>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver an event to every current subscriber of its topic
    ///
    /// Returns the number of subscribers the event was queued for.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let topic = event.topic;
        let mut delivered = 0;
        let mut closed = Vec::new();

        let mut subscribers = self.subscribers();
        for (id, subscriber) in subscribers.iter() {
            if !subscriber.topics.contains(&topic) {
                continue;
            }
            match subscriber.tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("[EventBus] Queue full for {}, dropping {:?} event", id, topic);
                }
                Err(TrySendError::Closed(_)) => closed.push(*id),
            }
        }
        for id in closed {
            subscribers.remove(&id);
        }
        drop(subscribers);

        tracing::debug!("[EventBus] {:?} for post {} delivered to {} subscribers", topic, event.post_id, delivered);
        delivered
    }

    /// Subscribe to a single topic
    pub fn subscribe(&self, topic: Topic) -> EventSubscription {
        self.subscribe_many(&[topic])
    }

    /// Subscribe to several topics through one ordered queue
    pub fn subscribe_many(&self, topics: &[Topic]) -> EventSubscription {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(self.inner.capacity);

        self.subscribers().insert(
            id,
            Subscriber {
                topics: topics.to_vec(),
                tx,
            },
        );
        tracing::debug!("[EventBus] {} subscribed to {:?}", id, topics);

        EventSubscription {
            id,
            topics: topics.to_vec(),
            rx,
            bus: self.clone(),
        }
    }

    /// Remove a subscription; unknown ids are ignored
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if self.subscribers().remove(&id).is_some() {
            tracing::debug!("[EventBus] {} unsubscribed", id);
        }
    }

    /// Number of subscribers currently registered for `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers()
            .values()
            .filter(|s| s.topics.contains(&topic))
            .count()
    }

    /// Drop every subscription; open streams end once drained
    pub fn shutdown(&self) {
        let count = {
            let mut subscribers = self.subscribers();
            let count = subscribers.len();
            subscribers.clear();
            count
        };
        tracing::info!("[EventBus] Shut down, released {} subscriptions", count);
    }
}

/// A live subscription, consumed as a stream of events
///
/// The stream ends after `unsubscribe` or `shutdown`. Dropping it
/// unsubscribes.
pub struct EventSubscription {
    id: SubscriptionId,
    topics: Vec<Topic>,
    rx: mpsc::Receiver<ChangeEvent>,
    bus: EventBus,
}

impl EventSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        self.rx.recv().await
    }
}

impl Stream for EventSubscription {
    type Item = ChangeEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}
