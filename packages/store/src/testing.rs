//! Test helpers for driving overlapping operations.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::oneshot;

use crate::remote::{Document, RemoteError, RemoteStore};

/// Wraps a store and holds back chosen responses.
///
/// Each call performs the inner operation immediately, then, if a hold was
/// queued with [`hold_next`](GatedStore::hold_next), waits for it to be
/// released before returning. Holds are consumed in call order.
#[derive(Clone)]
pub struct GatedStore<S> {
    inner: S,
    holds: Arc<Mutex<VecDeque<oneshot::Receiver<()>>>>,
}

impl<S: RemoteStore> GatedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            holds: Arc::default(),
        }
    }

    /// Queue a hold for the next call; send on the returned handle to release it.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds.lock().unwrap().push_back(rx);
        tx
    }

    async fn gate(&self) {
        let hold = self.holds.lock().unwrap().pop_front();
        if let Some(rx) = hold {
            let _ = rx.await;
        }
    }
}

impl<S: RemoteStore> RemoteStore for GatedStore<S> {
    async fn query_owned(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<Document>, RemoteError> {
        let result = self.inner.query_owned(collection, owner_id).await;
        self.gate().await;
        result
    }

    async fn insert(
        &self,
        collection: &str,
        owner_id: &str,
        body: Value,
    ) -> Result<String, RemoteError> {
        let result = self.inner.insert(collection, owner_id, body).await;
        self.gate().await;
        result
    }

    async fn update(
        &self,
        collection: &str,
        owner_id: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), RemoteError> {
        let result = self.inner.update(collection, owner_id, id, patch).await;
        self.gate().await;
        result
    }

    async fn delete(&self, collection: &str, owner_id: &str, id: &str) -> Result<(), RemoteError> {
        let result = self.inner.delete(collection, owner_id, id).await;
        self.gate().await;
        result
    }
}
