//! # User model for authenticated users
//!
//! ## [`User`] (server only)
//!
//! The `users` row, loaded with [`sqlx::FromRow`]. `email` is stored trimmed and
//! lower-cased and doubles as the sign-in identifier; `password_hash` is the
//! Argon2id PHC string.
//!
//! ## [`UserInfo`]
//!
//! The client-safe projection returned by the auth server functions. It
//! converts into the session mirror's [`store::User`].

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

impl From<UserInfo> for store::User {
    fn from(info: UserInfo) -> Self {
        store::User {
            uid: info.id,
            email: Some(info.email),
            display_name: info.name,
        }
    }
}
