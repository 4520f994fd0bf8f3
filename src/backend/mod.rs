//! Backend Module
//!
//! Server-side code for the feed: stores, services, both API surfaces and
//! the realtime fan-out.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── auth/        - Tokens, identity, signup/login, user handlers
//! ├── error/       - BackendError and its HTTP/GraphQL mapping
//! ├── graphql/     - async-graphql schema and handlers
//! ├── middleware/  - Authentication middleware and Identity extractor
//! ├── posts/       - PostService, OwnershipGuard, images, REST handlers
//! ├── realtime/    - EventBus, SubscriptionGateway, SSE endpoint
//! ├── routes/      - Router assembly
//! ├── server/      - AppState and startup
//! └── store/       - PostStore/UserStore traits, PostgreSQL and memory
//! ```
//!
//! # Request Flow
//!
//! Every request passes the authentication middleware, which attaches an
//! `IdentityContext`. Mutations go through `PostService`, which consults
//! `OwnershipGuard`, commits to the store and then publishes a
//! `ChangeEvent` on the `EventBus`. `SubscriptionGateway` forwards events
//! to SSE and GraphQL subscribers.

pub mod server;

pub mod routes;

pub mod realtime;

pub mod error;

pub mod auth;

pub mod middleware;

pub mod posts;

pub mod graphql;

pub mod store;

pub use server::create_app;
pub use error::BackendError;
pub use realtime::{EventBus, SubscriptionGateway};
pub use posts::{OwnershipGuard, PostService};
pub use auth::{AuthService, TokenAuthenticator};
