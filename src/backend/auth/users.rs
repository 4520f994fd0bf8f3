/**
 * User Model
 *
 * This module defines the user record as stored and its public profile.
 * Persistence lives behind `backend::store::UserStore`.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::post::Creator;

/// Status given to freshly registered users
pub const DEFAULT_STATUS: &str = "new user";

/// User struct representing a user in the store
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (unique)
    pub email: String,
    /// Display name
    pub name: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Free-form status line
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default status
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Public profile, without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            status: self.status.clone(),
        }
    }

    /// Creator summary attached to this user's posts
    pub fn creator(&self) -> Creator {
        Creator {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// User data that is safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_default_status() {
        let user = User::new("a@example.com".into(), "alice1".into(), "hash".into());
        assert_eq!(user.status, DEFAULT_STATUS);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_profile_omits_password() {
        let user = User::new("a@example.com".into(), "alice1".into(), "secret-hash".into());
        let json = serde_json::to_string(&user.profile()).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"_id\""));
    }
}
