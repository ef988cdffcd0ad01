//! # API crate — fullstack server functions for the project cost tracker
//!
//! Defines every Dioxus server function the web frontend calls, along with the
//! supporting modules they depend on.
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Password hashing, session keys, fault codes, sign-in throttle |
//! | [`db`] | — | PostgreSQL pool and [`db::PgDocumentStore`] |
//! | [`models`] | — | `User` row and its client-safe projection `UserInfo` |
//! | [`settings`] | `server` | `tracker.toml` loading |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is annotated with `#[get(...)]` or
//! `#[post(...)]` and compiled twice: once with full server logic (behind
//! `#[cfg(feature = "server")]`) and once as a client stub that forwards the
//! call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `register`, `login_password`, `logout`
//! - **Configuration**: `get_tracker_config`
//! - **Documents**: `list_documents`, `insert_document`, `update_document`, `delete_document`
//!
//! Document calls are scoped twice: the collection must be one of
//! [`store::models::COLLECTIONS`] and `owner_id` must be the session's user.

use dioxus::prelude::*;
use serde_json::Value;

pub mod auth;
pub mod db;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;

pub use auth::{auth_error_message, AuthErrorCode};
pub use models::UserInfo;
pub use store::{Document, TrackerConfig};

#[cfg(feature = "server")]
fn server_error(e: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

/// Check the collection name and that `owner_id` is the signed-in user.
#[cfg(feature = "server")]
async fn document_store(
    session: &tower_sessions::Session,
    collection: &str,
    owner_id: &str,
) -> Result<db::PgDocumentStore, ServerFnError> {
    if !store::models::COLLECTIONS.contains(&collection) {
        return Err(ServerFnError::new(format!("Unknown collection: {collection}")));
    }

    let Some(user_id) = auth::session_user_id(session).await? else {
        return Err(ServerFnError::new("Not authenticated"));
    };
    if user_id.to_string() != owner_id {
        tracing::warn!(%user_id, owner_id, "rejected document call for another owner");
        return Err(ServerFnError::new("Forbidden"));
    }

    let pool = db::get_pool().await.map_err(server_error)?;
    Ok(db::PgDocumentStore::new(pool.clone()))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(user_id) = auth::session_user_id(&session).await? else {
        return Ok(None);
    };

    let pool = get_pool().await.map_err(server_error)?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(server_error)?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session.flush().await.map_err(server_error)?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Register a new user with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();
    let min_len = settings::tracker_config().auth.min_password_length;

    if !store::validate::is_email(&email) {
        return Err(server_error(AuthErrorCode::InvalidEmail));
    }
    if password.chars().count() < min_len {
        return Err(server_error(AuthErrorCode::WeakPassword));
    }
    if name.is_empty() {
        return Err(ServerFnError::new("Name is required"));
    }

    let pool = get_pool().await.map_err(server_error)?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(server_error)?;

    if existing.is_some() {
        return Err(server_error(AuthErrorCode::EmailAlreadyInUse));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(server_error)?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(server_error)?;

    tracing::info!(user_id = %user.id, "registered new account");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let throttle = settings::login_throttle();

    if !throttle.admit(&email) {
        return Err(server_error(AuthErrorCode::TooManyRequests));
    }

    let pool = get_pool().await.map_err(server_error)?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(server_error)?;

    let Some(user) = user else {
        return Err(server_error(AuthErrorCode::UserNotFound));
    };

    let valid = auth::verify_password(&password, &user.password_hash).map_err(ServerFnError::new)?;

    if !valid {
        return Err(server_error(AuthErrorCode::WrongPassword));
    }

    throttle.record_success(&email);
    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(server_error)?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The deployment's `tracker.toml`, as the client should apply it.
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn get_tracker_config() -> Result<TrackerConfig, ServerFnError> {
    Ok(settings::tracker_config().clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn get_tracker_config() -> Result<TrackerConfig, ServerFnError> {
    Ok(TrackerConfig::default())
}

/// Every document in `collection` owned by `owner_id`.
#[cfg(feature = "server")]
#[post("/api/documents/list", session: tower_sessions::Session)]
pub async fn list_documents(
    collection: String,
    owner_id: String,
) -> Result<Vec<Document>, ServerFnError> {
    use store::RemoteStore;

    let docs = document_store(&session, &collection, &owner_id).await?;
    docs.query_owned(&collection, &owner_id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/list")]
pub async fn list_documents(
    collection: String,
    owner_id: String,
) -> Result<Vec<Document>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Store a new document and return its id.
#[cfg(feature = "server")]
#[post("/api/documents/insert", session: tower_sessions::Session)]
pub async fn insert_document(
    collection: String,
    owner_id: String,
    body: Value,
) -> Result<String, ServerFnError> {
    use store::RemoteStore;

    let docs = document_store(&session, &collection, &owner_id).await?;
    docs.insert(&collection, &owner_id, body)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/insert")]
pub async fn insert_document(
    collection: String,
    owner_id: String,
    body: Value,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Merge `patch` into an existing document.
#[cfg(feature = "server")]
#[post("/api/documents/update", session: tower_sessions::Session)]
pub async fn update_document(
    collection: String,
    owner_id: String,
    id: String,
    patch: Value,
) -> Result<(), ServerFnError> {
    use store::RemoteStore;

    let docs = document_store(&session, &collection, &owner_id).await?;
    docs.update(&collection, &owner_id, &id, patch)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/update")]
pub async fn update_document(
    collection: String,
    owner_id: String,
    id: String,
    patch: Value,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Remove a document. Deleting a missing id succeeds.
#[cfg(feature = "server")]
#[post("/api/documents/delete", session: tower_sessions::Session)]
pub async fn delete_document(
    collection: String,
    owner_id: String,
    id: String,
) -> Result<(), ServerFnError> {
    use store::RemoteStore;

    let docs = document_store(&session, &collection, &owner_id).await?;
    docs.delete(&collection, &owner_id, &id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/delete")]
pub async fn delete_document(
    collection: String,
    owner_id: String,
    id: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
