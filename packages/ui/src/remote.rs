//! [`RemoteStore`] over the `api` document server functions.
//!
//! The server re-checks ownership against the session cookie, so `owner_id`
//! here only has to agree with it.

use serde_json::Value;
use store::{Document, RemoteError, RemoteStore};

/// Browser-side handle to the hosted document database.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiRemote;

fn unavailable(e: impl std::fmt::Display) -> RemoteError {
    RemoteError::Unavailable(e.to_string())
}

impl RemoteStore for ApiRemote {
    async fn query_owned(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<Document>, RemoteError> {
        api::list_documents(collection.to_string(), owner_id.to_string())
            .await
            .map_err(unavailable)
    }

    async fn insert(
        &self,
        collection: &str,
        owner_id: &str,
        body: Value,
    ) -> Result<String, RemoteError> {
        api::insert_document(collection.to_string(), owner_id.to_string(), body)
            .await
            .map_err(unavailable)
    }

    async fn update(
        &self,
        collection: &str,
        owner_id: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), RemoteError> {
        api::update_document(
            collection.to_string(),
            owner_id.to_string(),
            id.to_string(),
            patch,
        )
        .await
        .map_err(unavailable)
    }

    async fn delete(&self, collection: &str, owner_id: &str, id: &str) -> Result<(), RemoteError> {
        api::delete_document(collection.to_string(), owner_id.to_string(), id.to_string())
            .await
            .map_err(unavailable)
    }
}
