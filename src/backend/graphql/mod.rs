//! GraphQL Module
//!
//! Statically typed GraphQL API over the same services as the REST routes.
//!
//! # Module Structure
//!
//! ```text
//! graphql/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Input and output objects
//! ├── schema.rs   - Query, Mutation and Subscription roots
//! └── handlers.rs - axum handlers
//! ```
//!
//! Errors carry `{ status, details }` in their extensions; an unauthenticated
//! call reports status 401.

pub mod handlers;
pub mod schema;
pub mod types;

pub use handlers::{graphiql, graphql_handler, schema_sdl, GRAPHQL_PATH, GRAPHQL_WS_PATH};
pub use schema::{build_schema, FeedSchema, MutationRoot, QueryRoot, SubscriptionRoot};
