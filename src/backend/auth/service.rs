/**
 * Authentication Service
 *
 * Registration, login and profile operations shared by the REST handlers and
 * the GraphQL resolvers.
 *
 * # Validation
 *
 * - Email must be a syntactically valid address
 * - Name must be alphanumeric and at least 5 characters
 * - Password must not be empty
 *
 * Every violated field is reported in a single `InvalidInput` error.
 */

use std::sync::Arc;

use validator::ValidateEmail;

use crate::backend::auth::sessions::{IdentityContext, TokenAuthenticator};
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::store::{StoreError, UserStore};
use crate::shared::error::FieldError;
use crate::shared::post::has_min_length;

/// Minimum display name length
pub const MIN_NAME_LENGTH: usize = 5;

/// Token handed out after a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user_id: uuid::Uuid,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenAuthenticator,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenAuthenticator, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenAuthenticator {
        &self.tokens
    }

    /// Register a new user
    pub async fn signup(&self, email: &str, name: &str, password: &str) -> Result<User, BackendError> {
        let email = email.trim();
        let name = name.trim();

        let mut errors = Vec::new();
        if !email.validate_email() {
            errors.push(FieldError::new("email", "E-Mail is invalid"));
        }
        if !is_valid_name(name) {
            errors.push(FieldError::new("name", "Name is too short or not alphanumeric"));
        }
        if password.trim().is_empty() {
            errors.push(FieldError::new("password", "Password is empty"));
        }
        if !errors.is_empty() {
            return Err(BackendError::invalid_input(errors));
        }

        if self.users.find_by_email(email).await?.is_some() {
            tracing::warn!("Signup with existing email: {}", email);
            return Err(BackendError::invalid_field("email", "E-Mail address already exists"));
        }

        let password_hash = hash_password(password.to_string(), self.bcrypt_cost).await?;
        let user = User::new(email.to_string(), name.to_string(), password_hash);

        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => {
                return Err(BackendError::invalid_field("email", "E-Mail address already exists"));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("User created: {} ({})", user.name, user.id);
        Ok(user)
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, BackendError> {
        let email = email.trim();
        if !email.validate_email() {
            return Err(BackendError::invalid_field("email", "E-Mail is invalid"));
        }

        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login for unknown email: {}", email);
                return Err(BackendError::invalid_credentials("User not found"));
            }
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::warn!("Wrong password for user {}", user.id);
            return Err(BackendError::invalid_credentials("Wrong password"));
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        tracing::info!("User logged in: {}", user.id);

        Ok(LoginOutcome {
            token,
            user_id: user.id,
        })
    }

    /// The user behind an identity
    pub async fn current_user(&self, identity: &IdentityContext) -> Result<User, BackendError> {
        let user_id = identity.require_user()?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| BackendError::not_found("User not found"))
    }

    pub async fn update_status(&self, identity: &IdentityContext, status: &str) -> Result<User, BackendError> {
        let user_id = identity.require_user()?;
        let status = status.trim();
        if status.is_empty() {
            return Err(BackendError::invalid_field("status", "Status is empty"));
        }

        self.users
            .update_status(user_id, status)
            .await?
            .ok_or_else(|| BackendError::not_found("User not found"))
    }
}

fn is_valid_name(name: &str) -> bool {
    has_min_length(name, MIN_NAME_LENGTH) && name.chars().all(char::is_alphanumeric)
}

async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
        .map_err(BackendError::from)
}

async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
        .map_err(BackendError::from)
}
