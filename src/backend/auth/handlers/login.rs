/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt on a blocking thread
 * - Unknown email and wrong password both return 401
 * - User passwords are never returned in responses
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `422 Unprocessable Entity` - If the email is not a valid address
///
/// # Example Request
///
/// ```http
/// POST /auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "userId": "123e4567-e89b-12d3-a456-426614174000"
/// }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let outcome = auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user_id: outcome.user_id,
    }))
}
