/**
 * Authentication Middleware
 *
 * This module runs the token authenticator on every request and attaches the
 * resulting `IdentityContext` to the request extensions. It never rejects a
 * request: handlers and services decide whether an identity is required.
 *
 * The token is read from the `Authentication` header (not `Authorization`),
 * formatted as `Bearer <token>`.
 */

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::{IdentityContext, TokenAuthenticator};

/// Name of the header carrying the bearer token
pub const AUTH_HEADER: &str = "Authentication";

/// Raw value of the authentication header, if present and valid UTF-8
pub fn auth_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTH_HEADER).and_then(|h| h.to_str().ok())
}

/// Authentication middleware
///
/// This middleware:
/// 1. Reads the `Authentication` header
/// 2. Verifies the token, if any
/// 3. Attaches the identity (possibly anonymous) to request extensions
pub async fn authentication(
    State(tokens): State<TokenAuthenticator>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = tokens.authenticate(auth_header(request.headers()));
    if identity.authenticated {
        tracing::trace!("Request authenticated as {:?}", identity.user_id);
    }

    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Axum extractor for the request's identity
///
/// Falls back to an anonymous identity when the middleware did not run.
#[derive(Clone, Debug)]
pub struct Identity(pub IdentityContext);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .unwrap_or_default();

        Ok(Identity(identity))
    }
}
