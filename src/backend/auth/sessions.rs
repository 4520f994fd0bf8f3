/**
 * Session Tokens
 *
 * This module issues and verifies the HS256 bearer tokens carried in the
 * `Authentication` header and turns them into an `IdentityContext`.
 *
 * Verification never fails the request: a missing, malformed, expired or
 * foreign token simply yields an unauthenticated identity. Operations that
 * need a user enforce that themselves.
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    /// User ID as a string; anything that is not a UUID is rejected
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Who is making a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
    pub authenticated: bool,
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
}

impl IdentityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            user_id: Some(user_id),
            email: Some(email.into()),
        }
    }

    /// The caller's user id, or `NotAuthenticated`
    pub fn require_user(&self) -> Result<Uuid, BackendError> {
        match (self.authenticated, self.user_id) {
            (true, Some(id)) => Ok(id),
            _ => Err(BackendError::NotAuthenticated),
        }
    }
}

/// Issues and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct TokenAuthenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenAuthenticator {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Create a token for a user, valid for the configured lifetime
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, BackendError> {
        let now = unix_now();
        let claims = Claims {
            email: email.to_string(),
            user_id: user_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify and decode a raw token
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Derive the identity for a raw `Authentication` header value
    ///
    /// Accepts `Bearer <token>` as well as a bare token.
    pub fn authenticate(&self, raw_header: Option<&str>) -> IdentityContext {
        let Some(raw) = raw_header else {
            return IdentityContext::anonymous();
        };

        let raw = raw.trim();
        let token = match raw.split_once(char::is_whitespace) {
            Some(("Bearer", rest)) => rest.trim(),
            _ => raw,
        };
        if token.is_empty() {
            return IdentityContext::anonymous();
        }

        let claims = match self.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                return IdentityContext::anonymous();
            }
        };

        match Uuid::parse_str(&claims.user_id) {
            Ok(user_id) => IdentityContext::authenticated(user_id, claims.email),
            Err(e) => {
                tracing::debug!("Token carries invalid user id: {}", e);
                IdentityContext::anonymous()
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
