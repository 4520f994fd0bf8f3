/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email, name and password (all violations reported together)
 * 2. Reject an email that is already registered
 * 3. Hash password using bcrypt
 * 4. Create user in the store
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Sign up handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - If a field is invalid or the email is taken
/// * `500 Internal Server Error` - If hashing or the store fails
///
/// # Example Request
///
/// ```http
/// POST /auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "name": "alice",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "message": "User created succesfully",
///   "user": "123e4567-e89b-12d3-a456-426614174000"
/// }
/// ```
pub async fn signup(
    State(auth): State<AuthService>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), BackendError> {
    tracing::info!("Signup request for email: {}", request.email);

    let user = auth
        .signup(&request.email, &request.name, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created succesfully".to_string(),
            user: user.id,
        }),
    ))
}
