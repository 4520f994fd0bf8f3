/**
 * Backend Error Types
 *
 * Every service operation returns a typed `BackendError`; the REST and
 * GraphQL boundaries map the variant to their own status codes.
 *
 * # Error Categories
 *
 * - `NotAuthenticated` - the request carries no valid identity
 * - `NotAuthorized` - the caller does not own the referenced post
 * - `NotFound` - the referenced resource does not exist
 * - `InvalidInput` - one or more fields failed validation
 * - `InvalidCredentials` - login with an unknown e-mail or wrong password
 * - `Internal` / `Store` - anything unexpected; details are logged, not returned
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::error::{FieldError, SharedError};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use postfeed::backend::error::BackendError;
/// use postfeed::shared::FieldError;
///
/// let err = BackendError::not_found("No post found");
/// let err = BackendError::invalid_input(vec![FieldError::new("title", "Invalid title")]);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// No valid identity on the request
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Identity is valid but does not own the resource
    #[error("Not authorized")]
    NotAuthorized,

    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Validation failure listing every violated field
    #[error("{message}")]
    InvalidInput {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{message}")]
    InvalidCredentials { message: String },

    /// Unexpected failure (hashing, token signing, I/O)
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Store collaborator failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BackendError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a validation error with the standard message
    pub fn invalid_input(details: Vec<FieldError>) -> Self {
        Self::InvalidInput {
            message: "Invalid input data".to_string(),
            details,
        }
    }

    /// Create a validation error for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::invalid_input(vec![FieldError::new(field, message)])
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for the REST surface
    ///
    /// `NotAuthenticated` is 422 here to stay compatible with existing
    /// REST clients; GraphQL reports 401 (see [`Self::graphql_status`]).
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
            Self::Internal { .. } | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status code reported in GraphQL error extensions
    pub fn graphql_status(&self) -> u16 {
        match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED.as_u16(),
            other => other.status_code().as_u16(),
        }
    }

    /// Message safe to show to clients
    pub fn message(&self) -> String {
        match self {
            Self::Internal { .. } | Self::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Field-level details, empty unless this is `InvalidInput`
    pub fn details(&self) -> &[FieldError] {
        match self {
            Self::InvalidInput { details, .. } => details,
            _ => &[],
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. } | Self::Store(_))
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        let SharedError::ValidationError { errors } = err;
        Self::invalid_input(errors)
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::internal(format!("token signing failed: {}", err))
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("password hashing failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::NotAuthenticated.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(BackendError::NotAuthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::invalid_field("title", "Invalid title").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(BackendError::invalid_credentials("Wrong password").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::internal("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_graphql_status_for_unauthenticated() {
        assert_eq!(BackendError::NotAuthenticated.graphql_status(), 401);
        assert_eq!(BackendError::NotAuthorized.graphql_status(), 403);
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let error = BackendError::internal("connection refused on 10.0.0.3");
        assert_eq!(error.message(), "Internal server error");
        assert!(error.is_internal());
    }

    #[test]
    fn test_from_shared_validation_error() {
        let shared = SharedError::validation(vec![
            FieldError::new("title", "Invalid title"),
            FieldError::new("content", "Invalid content"),
        ]);
        let error: BackendError = shared.into();
        assert_eq!(error.details().len(), 2);
        assert_eq!(error.message(), "Invalid input data");
    }

    #[test]
    fn test_details_empty_for_other_variants() {
        assert!(BackendError::NotAuthorized.details().is_empty());
    }
}
