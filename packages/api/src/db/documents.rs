//! # `documents` table — Postgres implementation of [`RemoteStore`]
//!
//! One row per record: `(id, collection, owner_id, body jsonb, created_at)`.
//! Every statement filters on `owner_id`, so a caller can never see or touch
//! another user's rows even with a guessed id. Updates merge with
//! `body || $patch`, which replaces only the top-level keys present in the
//! patch.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use store::{Document, RemoteError, RemoteStore};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    body: Value,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id.to_string(),
            owner_id: row.owner_id.to_string(),
            created_at: Some(row.created_at),
            body: row.body,
        }
    }
}

fn unavailable(e: sqlx::Error) -> RemoteError {
    tracing::error!("document store query failed: {}", e);
    RemoteError::Unavailable(e.to_string())
}

fn owner_uuid(owner_id: &str) -> Result<Uuid, RemoteError> {
    Uuid::parse_str(owner_id).map_err(|_| RemoteError::Forbidden)
}

/// Owner-scoped document store over a shared pool.
#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RemoteStore for PgDocumentStore {
    async fn query_owned(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<Document>, RemoteError> {
        let owner = owner_uuid(owner_id)?;
        let rows: Vec<DocumentRow> = sqlx::query_as(
            "SELECT id, owner_id, created_at, body FROM documents WHERE collection = $1 AND owner_id = $2",
        )
        .bind(collection)
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn insert(
        &self,
        collection: &str,
        owner_id: &str,
        body: Value,
    ) -> Result<String, RemoteError> {
        let owner = owner_uuid(owner_id)?;
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO documents (collection, owner_id, body) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(collection)
        .bind(owner)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(id.to_string())
    }

    async fn update(
        &self,
        collection: &str,
        owner_id: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), RemoteError> {
        let owner = owner_uuid(owner_id)?;
        let doc_id = Uuid::parse_str(id).map_err(|_| RemoteError::NotFound(id.to_string()))?;
        let result = sqlx::query(
            "UPDATE documents SET body = body || $4 WHERE collection = $1 AND owner_id = $2 AND id = $3",
        )
        .bind(collection)
        .bind(owner)
        .bind(doc_id)
        .bind(patch)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, owner_id: &str, id: &str) -> Result<(), RemoteError> {
        let owner = owner_uuid(owner_id)?;
        // An id that is not a uuid cannot name a stored row.
        let Ok(doc_id) = Uuid::parse_str(id) else {
            return Ok(());
        };
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND owner_id = $2 AND id = $3")
            .bind(collection)
            .bind(owner)
            .bind(doc_id)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
