/**
 * API Route Handlers
 *
 * Authentication and current-user endpoints.
 *
 * # Routes
 *
 * - `POST /auth/signup` - User registration
 * - `POST /auth/login` - User login
 * - `GET /user` - Current user profile
 * - `PUT /user` - Update the current user's status
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{get_user, login, signup, update_status};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// `/auth/*` is public; `/user` needs a token in the `Authentication`
/// header, checked by the handlers.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/user", get(get_user).put(update_status))
}
