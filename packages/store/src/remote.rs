//! # Remote document store
//!
//! [`RemoteStore`] is the async interface to the hosted document database.
//! Documents live in named collections and carry an owner id; every call is
//! scoped to one owner. Implementations:
//!
//! - [`crate::MemoryStore`] — in-process, for tests and offline native builds.
//! - `api::db::PgDocumentStore` — Postgres `jsonb` rows, server side.
//! - `ui::ApiRemote` — forwards to the `api` server functions from the browser.
//!
//! | Method | Contract |
//! |--------|----------|
//! | [`query_owned`](RemoteStore::query_owned) | Every document in the collection whose owner matches. Order is unspecified. |
//! | [`insert`](RemoteStore::insert) | Stores the body, assigns id and creation time, returns only the id. |
//! | [`update`](RemoteStore::update) | Merges the partial body into an existing document. Missing id is [`RemoteError::NotFound`]. |
//! | [`delete`](RemoteStore::delete) | Removes the document. Missing id is not an error. |

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure reported by a [`RemoteStore`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
    #[error("document {0} not found")]
    NotFound(String),
    #[error("malformed document {id}: {reason}")]
    Malformed { id: String, reason: String },
    #[error("not permitted to access this document")]
    Forbidden,
}

/// A stored document as returned by an owner-scoped query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub owner_id: String,
    /// Server-assigned creation time, if the store recorded one.
    pub created_at: Option<DateTime<Utc>>,
    pub body: Value,
}

impl Document {
    /// Deserialize the body into a typed payload.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, RemoteError> {
        serde_json::from_value(self.body.clone()).map_err(|e| RemoteError::Malformed {
            id: self.id.clone(),
            reason: e.to_string(),
        })
    }
}

/// Async interface to a user-scoped document database.
pub trait RemoteStore {
    fn query_owned(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> impl Future<Output = Result<Vec<Document>, RemoteError>>;

    fn insert(
        &self,
        collection: &str,
        owner_id: &str,
        body: Value,
    ) -> impl Future<Output = Result<String, RemoteError>>;

    fn update(
        &self,
        collection: &str,
        owner_id: &str,
        id: &str,
        patch: Value,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    fn delete(
        &self,
        collection: &str,
        owner_id: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), RemoteError>>;
}

/// Merge the top-level keys of `patch` into `body`.
pub fn merge_patch(body: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(source)) = (body, patch) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Serialize a payload into a document body.
pub fn to_body<T: Serialize>(payload: &T) -> Result<Value, RemoteError> {
    serde_json::to_value(payload).map_err(|e| RemoteError::Malformed {
        id: String::new(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_patch_overwrites_only_given_keys() {
        let mut body = json!({ "name": "Lumber", "cost": 120.0 });
        merge_patch(&mut body, &json!({ "cost": 75.0 }));
        assert_eq!(body, json!({ "name": "Lumber", "cost": 75.0 }));
    }
}
