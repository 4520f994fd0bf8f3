/**
 * Feed Route Handlers
 *
 * # Routes
 *
 * - `GET /feed/posts` - Paginated post listing
 * - `POST /feed/post` - Create a post
 * - `GET|PUT|DELETE /feed/post/{postId}` - Single post
 * - `PUT /post-image` - Standalone image upload
 * - `GET /realtime` - Server-Sent Events for post changes
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::posts::handlers::{create_post, delete_post, get_post, get_posts, update_post, upload_image};
use crate::backend::realtime::subscription::handle_realtime_subscription;
use crate::backend::server::state::AppState;

/// Configure feed routes
pub fn configure_feed_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/feed/posts", get(get_posts))
        .route("/feed/post", post(create_post))
        .route(
            "/feed/post/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/post-image", put(upload_image))
        .route("/realtime", get(handle_realtime_subscription))
}
