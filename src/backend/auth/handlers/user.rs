/**
 * Current User Handlers
 *
 * GET /user returns the caller's profile, PUT /user changes their status.
 * Both need a valid `Authentication` header.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{MessageResponse, StatusRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::UserProfile;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::Identity;

/// Get current user handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - If the request is not authenticated
/// * `404 Not Found` - If the user no longer exists
pub async fn get_user(
    State(auth): State<AuthService>,
    Identity(identity): Identity,
) -> Result<Json<UserProfile>, BackendError> {
    let user = auth.current_user(&identity).await?;
    Ok(Json(user.profile()))
}

/// Update status handler
///
/// # Example Request
///
/// ```http
/// PUT /user HTTP/1.1
/// Authentication: Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...
/// Content-Type: application/json
///
/// { "status": "on holiday" }
/// ```
pub async fn update_status(
    State(auth): State<AuthService>,
    Identity(identity): Identity,
    Json(request): Json<StatusRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    auth.update_status(&identity, &request.status).await?;

    Ok(Json(MessageResponse {
        message: "Updated successfully".to_string(),
    }))
}
