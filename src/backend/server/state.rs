/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central container for the services behind
 * both surfaces:
 * - `AuthService` for signup, login and the current user
 * - `PostService` for post reads and mutations
 * - `SubscriptionGateway` for SSE and GraphQL subscribers
 * - `TokenAuthenticator` for the authentication middleware
 * - the GraphQL schema
 *
 * Every service is a cheap `Clone` over shared internals, so handlers can
 * extract just the part they need.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::{AuthService, TokenAuthenticator};
use crate::backend::graphql::FeedSchema;
use crate::backend::posts::{ImageStore, PostService};
use crate::backend::realtime::SubscriptionGateway;
use crate::shared::config::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub posts: PostService,
    pub images: ImageStore,
    pub gateway: SubscriptionGateway,
    pub tokens: TokenAuthenticator,
    /// Built from the services above; shares their internals
    pub schema: FeedSchema,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for PostService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.posts.clone()
    }
}

impl FromRef<AppState> for ImageStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.images.clone()
    }
}

impl FromRef<AppState> for SubscriptionGateway {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gateway.clone()
    }
}

impl FromRef<AppState> for TokenAuthenticator {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for FeedSchema {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.schema.clone()
    }
}
