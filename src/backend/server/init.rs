/**
 * Server Initialization
 *
 * Wires stores, services and the router together.
 *
 * # Initialization Process
 *
 * 1. Pick the stores: PostgreSQL when `DATABASE_URL` is set, memory otherwise
 * 2. Start the image cleanup task
 * 3. Build the event bus, gateway, services and GraphQL schema
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::{AuthService, TokenAuthenticator};
use crate::backend::graphql::build_schema;
use crate::backend::posts::{ImageCleaner, ImageStore, PostService, UploadConfig};
use crate::backend::realtime::{EventBus, SubscriptionGateway};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::store::memory::{MemoryPostStore, MemoryUserStore};
use crate::backend::store::postgres::{PgPostStore, PgUserStore};
use crate::backend::store::{PostStore, UserStore};
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails only when `DATABASE_URL` is set and the database is unreachable.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing postfeed backend server");

    let (posts, users): (Arc<dyn PostStore>, Arc<dyn UserStore>) = match &config.database_url {
        Some(url) => {
            let pool = load_database(url).await?;
            (Arc::new(PgPostStore::new(pool.clone())), Arc::new(PgUserStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Data is kept in memory and lost on restart.");
            (Arc::new(MemoryPostStore::new()), Arc::new(MemoryUserStore::new()))
        }
    };

    let app_state = build_state(config, posts, users);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the application state over the given stores
///
/// Must be called inside a tokio runtime; it spawns the image cleanup task.
pub fn build_state(config: AppConfig, posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> AppState {
    let tokens = TokenAuthenticator::new(&config.jwt_secret, config.token_ttl);

    let cleaner = ImageCleaner::spawn(&config.images_dir);
    let images = ImageStore::new(UploadConfig::new(&config.images_dir), cleaner.clone());

    let bus = EventBus::new(config.subscriber_capacity);
    let gateway = SubscriptionGateway::new(bus.clone());

    let auth = AuthService::new(users.clone(), tokens.clone(), config.bcrypt_cost);
    let posts = PostService::new(posts, users, bus, cleaner, config.page_size);

    let schema = build_schema(auth.clone(), posts.clone(), gateway.clone());

    tracing::info!(
        "Services ready (page size {}, subscriber capacity {})",
        config.page_size,
        config.subscriber_capacity
    );

    AppState {
        config: Arc::new(config),
        auth,
        posts,
        images,
        gateway,
        tokens,
        schema,
    }
}
