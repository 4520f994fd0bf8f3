//! Real-time Update Module
//!
//! This module turns committed post changes into notifications for
//! connected clients.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── bus.rs          - In-process topic pub/sub (EventBus)
//! ├── gateway.rs      - Per-connection subscriptions and payloads
//! └── subscription.rs - SSE handler for GET /realtime
//! ```
//!
//! # Flow
//!
//! ```text
//! PostService ──publish──▶ EventBus ──▶ SubscriptionGateway ──▶ SSE / GraphQL ws
//! ```
//!
//! Delivery is at-most-once. Events published while nobody listens are
//! dropped, and a reconnecting client does not see what it missed.

/// Topic-based event bus
pub mod bus;

/// Connection-level subscription management
pub mod gateway;

/// Server-Sent Events subscription handler
pub mod subscription;

pub use bus::{EventBus, EventSubscription, SubscriptionId};
pub use gateway::{ConnectionId, GatewayConnection, GatewayMessage, SubscriptionGateway};
pub use subscription::{handle_realtime_subscription, parse_channels};
