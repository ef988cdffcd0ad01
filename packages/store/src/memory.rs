use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::remote::{merge_patch, Document, RemoteError, RemoteStore};

type Collections = HashMap<String, Vec<Document>>;

/// In-memory RemoteStore for testing and offline native builds.
///
/// Clones share the same documents, so a test can hold one handle while a
/// [`crate::Collection`] owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
    fail_next: Arc<Mutex<Option<String>>>,
    offline: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with [`RemoteError::Unavailable`].
    pub fn fail_next(&self, reason: &str) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(reason.to_string());
        }
    }

    /// Fail every call until switched back.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut flag) = self.offline.lock() {
            *flag = offline;
        }
    }

    /// Insert a document directly, bypassing fault injection. Returns its id.
    pub fn seed(
        &self,
        collection: &str,
        owner_id: &str,
        body: Value,
        created_at: Option<DateTime<Utc>>,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        if let Ok(mut collections) = self.collections.lock() {
            collections
                .entry(collection.to_string())
                .or_default()
                .push(Document {
                    id: id.clone(),
                    owner_id: owner_id.to_string(),
                    created_at,
                    body,
                });
        }
        id
    }

    /// Snapshot of every document in a collection, all owners.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .map(|c| c.get(collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), RemoteError> {
        if self.offline.lock().map(|flag| *flag).unwrap_or(false) {
            return Err(RemoteError::Unavailable("store offline".to_string()));
        }
        let pending = self.fail_next.lock().ok().and_then(|mut slot| slot.take());
        match pending {
            Some(reason) => Err(RemoteError::Unavailable(reason)),
            None => Ok(()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RemoteError> {
        self.collections
            .lock()
            .map_err(|e| RemoteError::Unavailable(e.to_string()))
    }
}

impl RemoteStore for MemoryStore {
    async fn query_owned(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<Document>, RemoteError> {
        self.check_available()?;
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.owner_id == owner_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: &str,
        owner_id: &str,
        body: Value,
    ) -> Result<String, RemoteError> {
        self.check_available()?;
        let id = uuid::Uuid::new_v4().to_string();
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                owner_id: owner_id.to_string(),
                created_at: Some(Utc::now()),
                body,
            });
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        owner_id: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), RemoteError> {
        self.check_available()?;
        let mut collections = self.lock()?;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        if doc.owner_id != owner_id {
            return Err(RemoteError::Forbidden);
        }
        merge_patch(&mut doc.body, &patch);
        Ok(())
    }

    async fn delete(&self, collection: &str, owner_id: &str, id: &str) -> Result<(), RemoteError> {
        self.check_available()?;
        let mut collections = self.lock()?;
        if let Some(docs) = collections.get_mut(collection) {
            if docs.iter().any(|d| d.id == id && d.owner_id != owner_id) {
                return Err(RemoteError::Forbidden);
            }
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}
