/**
 * Authentication Handler Types
 *
 * This module defines the request and response bodies used by the
 * authentication and user handlers.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    /// Display name (alphanumeric, at least 5 characters)
    pub name: String,
    /// Plain password, hashed before storage
    pub password: String,
}

/// Sign up response
#[derive(Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    pub message: String,
    /// ID of the created user
    pub user: Uuid,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// The token goes into the `Authentication: Bearer <token>` header of
/// subsequent requests.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// Status update request for PUT /user
#[derive(Deserialize, Serialize, Debug)]
pub struct StatusRequest {
    pub status: String,
}

/// Plain confirmation message
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}
