//! # Remote-backed collection
//!
//! [`Collection`] keeps a local reflection of one user-scoped remote collection
//! and applies user mutations to it once the remote call succeeds. Both record
//! stores of the application are instances of it: `Collection<ProjectItem, _>`
//! and `Collection<OtherCost, _>`.
//!
//! ## Operations
//!
//! | Method | Remote call | Local effect on success |
//! |--------|-------------|-------------------------|
//! | [`load`](Collection::load) | owner-scoped query | replaces the whole collection |
//! | [`add`](Collection::add) | insert | appends one record with an estimated timestamp |
//! | [`update`](Collection::update) | partial update | overwrites the patched fields in place |
//! | [`delete`](Collection::delete) | delete | removes the record (missing id is fine) |
//!
//! On failure the entities are left untouched and the failure is recorded as
//! [`Status::Failed`]; the next operation clears it. Operations may overlap:
//! each one is listed in [`CollectionState::pending`] until it settles, and
//! [`Status::Loading`] names the most recently issued one.
//!
//! ## Sequencing
//!
//! Every operation draws a ticket from a monotonically increasing counter.
//! Completions that arrive out of order are reconciled per record id:
//!
//! - an update is dropped if a newer mutation of the same id already landed;
//! - a load keeps the local copy of any id mutated after the load was issued,
//!   drops ids deleted after it was issued, and keeps records added after it;
//! - a load older than the last applied load is discarded outright.
//!
//! Nothing is cancelled or retried, and no ordering is imposed on the remote
//! side; the rules above only stop stale responses from overwriting newer
//! local state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::CreatedAt;
use crate::record::Record;
use crate::remote::{to_body, RemoteError, RemoteStore};
use crate::session::SessionHandle;

/// The four collection operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    Load,
    Add,
    Update,
    Delete,
}

impl OpKind {
    fn verb(self) -> &'static str {
        match self {
            OpKind::Load => "fetch",
            OpKind::Add => "add",
            OpKind::Update => "update",
            OpKind::Delete => "delete",
        }
    }
}

/// Store-wide status tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Idle,
    Loading(OpKind),
    Failed(OpKind, String),
}

/// An operation that has been issued but not yet settled.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingOp {
    pub ticket: u64,
    pub kind: OpKind,
    /// Record id for update and delete.
    pub target: Option<String>,
}

/// Observable state of a collection, cheap to clone into a UI signal.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionState<R> {
    pub entities: Vec<R>,
    pub pending: Vec<PendingOp>,
    pub failure: Option<(OpKind, String)>,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            pending: Vec::new(),
            failure: None,
        }
    }
}

impl<R: Record> CollectionState<R> {
    pub fn status(&self) -> Status {
        if let Some(op) = self.pending.last() {
            return Status::Loading(op.kind);
        }
        match &self.failure {
            Some((kind, message)) => Status::Failed(*kind, message.clone()),
            None => Status::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True while a load is in flight.
    pub fn is_fetching(&self) -> bool {
        self.pending.iter().any(|op| op.kind == OpKind::Load)
    }

    /// True while an update or delete of `id` is in flight.
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending
            .iter()
            .any(|op| op.target.as_deref() == Some(id))
    }

    pub fn error(&self) -> Option<&str> {
        self.failure.as_ref().map(|(_, message)| message.as_str())
    }

    /// The last failure if it came from a load.
    pub fn load_error(&self) -> Option<&str> {
        match &self.failure {
            Some((OpKind::Load, message)) => Some(message),
            _ => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.entities.iter().find(|r| r.id() == id)
    }
}

/// Latest mutation of one id that has been applied locally.
#[derive(Clone, Copy, Debug)]
struct Applied {
    ticket: u64,
    deleted: bool,
}

#[derive(Debug)]
struct Inner<R> {
    state: CollectionState<R>,
    next_ticket: u64,
    applied: HashMap<String, Applied>,
    applied_load: u64,
}

impl<R> Inner<R> {
    fn settle(&mut self, ticket: u64) {
        self.pending.retain(|op| op.ticket != ticket);
    }
}

impl<R> std::ops::Deref for Inner<R> {
    type Target = CollectionState<R>;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<R> std::ops::DerefMut for Inner<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

/// Local reflection of one user-scoped remote collection.
pub struct Collection<R: Record, S: RemoteStore> {
    remote: S,
    session: SessionHandle,
    inner: Mutex<Inner<R>>,
}

impl<R: Record, S: RemoteStore> Collection<R, S> {
    pub fn new(remote: S, session: SessionHandle) -> Self {
        Self {
            remote,
            session,
            inner: Mutex::new(Inner {
                state: CollectionState::default(),
                next_ticket: 1,
                applied: HashMap::new(),
                applied_load: 0,
            }),
        }
    }

    /// Replace the local collection with every record the current user owns.
    pub async fn load(&self) -> Result<(), StoreError> {
        let ticket = self.begin(OpKind::Load, None);
        let owner = self.require_owner(ticket, OpKind::Load)?;

        let fetched = self
            .remote
            .query_owned(R::COLLECTION, &owner)
            .await
            .and_then(|docs| {
                docs.into_iter()
                    .map(R::from_document)
                    .collect::<Result<Vec<R>, RemoteError>>()
            });

        match fetched {
            Ok(records) => {
                self.finish_load(ticket, records);
                Ok(())
            }
            Err(e) => Err(self.fail_remote(ticket, OpKind::Load, e)),
        }
    }

    /// Create a record. Fields are expected to be validated by the caller.
    /// Returns the id assigned by the remote store.
    pub async fn add(&self, fields: R::Fields) -> Result<String, StoreError> {
        let ticket = self.begin(OpKind::Add, None);
        let owner = self.require_owner(ticket, OpKind::Add)?;

        let inserted = match to_body(&fields) {
            Ok(body) => self.remote.insert(R::COLLECTION, &owner, body).await,
            Err(e) => Err(e),
        };

        match inserted {
            Ok(id) => {
                let mut inner = self.lock();
                inner.settle(ticket);
                // A load that finished first may already hold this record.
                let created_at = match inner.get(&id).map(|r| *r.created_at()) {
                    Some(ts @ CreatedAt::Server(_)) => ts,
                    _ => CreatedAt::estimate_now(),
                };
                let record = R::from_fields(id.clone(), fields, created_at);
                inner.applied.insert(
                    id.clone(),
                    Applied {
                        ticket,
                        deleted: false,
                    },
                );
                match inner.entities.iter_mut().find(|r| r.id() == id) {
                    Some(held) => *held = record,
                    None => inner.entities.push(record),
                }
                debug!(collection = R::COLLECTION, %id, "record added");
                Ok(id)
            }
            Err(e) => Err(self.fail_remote(ticket, OpKind::Add, e)),
        }
    }

    /// Send a partial update and apply it in place.
    ///
    /// If the id is no longer held locally once the remote call succeeds, the
    /// record is treated as already deleted and nothing changes.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<(), StoreError> {
        let ticket = self.begin(OpKind::Update, Some(id));
        let owner = self.require_owner(ticket, OpKind::Update)?;

        let updated = match to_body(&patch) {
            Ok(body) => self.remote.update(R::COLLECTION, &owner, id, body).await,
            Err(e) => Err(e),
        };
        if let Err(e) = updated {
            return Err(self.fail_remote(ticket, OpKind::Update, e));
        }

        let mut inner = self.lock();
        inner.settle(ticket);
        if inner
            .applied
            .get(id)
            .is_some_and(|applied| applied.ticket > ticket)
        {
            debug!(collection = R::COLLECTION, %id, ticket, "superseded update not applied");
            return Ok(());
        }
        match inner.entities.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.apply(&patch);
                inner.applied.insert(
                    id.to_string(),
                    Applied {
                        ticket,
                        deleted: false,
                    },
                );
            }
            None => debug!(collection = R::COLLECTION, %id, "updated record no longer held"),
        }
        Ok(())
    }

    /// Delete a record. Deleting an id that is not held is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let ticket = self.begin(OpKind::Delete, Some(id));
        let owner = self.require_owner(ticket, OpKind::Delete)?;

        if let Err(e) = self.remote.delete(R::COLLECTION, &owner, id).await {
            return Err(self.fail_remote(ticket, OpKind::Delete, e));
        }

        let mut inner = self.lock();
        inner.settle(ticket);
        inner.entities.retain(|r| r.id() != id);
        let ticket = inner
            .applied
            .get(id)
            .map_or(ticket, |applied| applied.ticket.max(ticket));
        inner.applied.insert(
            id.to_string(),
            Applied {
                ticket,
                deleted: true,
            },
        );
        Ok(())
    }

    pub fn snapshot(&self) -> CollectionState<R> {
        self.lock().state.clone()
    }

    pub fn entities(&self) -> Vec<R> {
        self.lock().entities.clone()
    }

    pub fn get(&self, id: &str) -> Option<R> {
        self.lock().get(id).cloned()
    }

    pub fn status(&self) -> Status {
        self.lock().status()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.lock().is_pending(id)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, kind: OpKind, target: Option<&str>) -> u64 {
        let mut inner = self.lock();
        let ticket = inner.next_ticket;
        inner.next_ticket += 1;
        inner.failure = None;
        inner.pending.push(PendingOp {
            ticket,
            kind,
            target: target.map(str::to_string),
        });
        debug!(collection = R::COLLECTION, ?kind, ticket, "operation started");
        ticket
    }

    fn require_owner(&self, ticket: u64, kind: OpKind) -> Result<String, StoreError> {
        match self.session.require_user() {
            Ok(user) => Ok(user.uid),
            Err(e) => Err(self.fail(ticket, kind, e)),
        }
    }

    fn fail_remote(&self, ticket: u64, kind: OpKind, error: RemoteError) -> StoreError {
        warn!(collection = R::COLLECTION, ?kind, %error, "remote call rejected");
        let noun = match kind {
            OpKind::Load => R::PLURAL,
            _ => R::SINGULAR,
        };
        let message = format!("Failed to {} {}", kind.verb(), noun);
        self.fail(ticket, kind, StoreError::RemoteUnavailable(message))
    }

    fn fail(&self, ticket: u64, kind: OpKind, error: StoreError) -> StoreError {
        let mut inner = self.lock();
        inner.settle(ticket);
        inner.failure = Some((kind, error.to_string()));
        error
    }

    fn finish_load(&self, ticket: u64, records: Vec<R>) {
        let mut inner = self.lock();
        inner.settle(ticket);
        if ticket < inner.applied_load {
            debug!(collection = R::COLLECTION, ticket, "stale load discarded");
            return;
        }
        inner.applied_load = ticket;

        let newer = |applied: &HashMap<String, Applied>, id: &str| {
            applied.get(id).copied().filter(|a| a.ticket > ticket)
        };

        let mut fresh = Vec::with_capacity(records.len());
        for record in records {
            match newer(&inner.applied, record.id()) {
                Some(Applied { deleted: true, .. }) => continue,
                Some(_) => {
                    let local = inner.get(record.id()).cloned();
                    fresh.push(local.unwrap_or(record));
                }
                None => fresh.push(record),
            }
        }
        for local in &inner.entities {
            let mutated_since = newer(&inner.applied, local.id()).is_some_and(|a| !a.deleted);
            if mutated_since && !fresh.iter().any(|r: &R| r.id() == local.id()) {
                fresh.push(local.clone());
            }
        }

        // Entries at or below this load only matter to operations still in
        // flight that were issued before them.
        let oldest_pending = inner.pending.iter().map(|op| op.ticket).min();
        inner.applied.retain(|_, a| {
            a.ticket > ticket || oldest_pending.is_some_and(|oldest| oldest < a.ticket)
        });

        debug!(collection = R::COLLECTION, count = fresh.len(), "collection loaded");
        inner.entities = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemFields, ItemPatch, ProjectItem, User};
    use crate::testing::GatedStore;
    use crate::MemoryStore;
    use serde_json::json;

    fn alice() -> SessionHandle {
        SessionHandle::signed_in(User {
            uid: "alice".into(),
            email: Some("alice@example.com".into()),
            display_name: None,
        })
    }

    fn lumber() -> ItemFields {
        ItemFields {
            name: "Lumber".into(),
            cost: 120.0,
        }
    }

    #[tokio::test]
    async fn test_add_to_empty_store() {
        let items: Collection<ProjectItem, _> = Collection::new(MemoryStore::new(), alice());

        items.add(lumber()).await.unwrap();

        let entities = items.entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].cost, 120.0);
        assert!(entities[0].created_at.is_pending());
        assert_eq!(items.status(), Status::Idle);
    }

    #[tokio::test]
    async fn test_add_then_load_echoes_fields() {
        let remote = MemoryStore::new();
        let items: Collection<ProjectItem, _> = Collection::new(remote, alice());

        let id = items.add(lumber()).await.unwrap();
        items.load().await.unwrap();

        let item = items.get(&id).unwrap();
        assert_eq!(item.name, "Lumber");
        assert_eq!(item.cost, 120.0);
        assert!(matches!(item.created_at, CreatedAt::Server(_)));
    }

    #[tokio::test]
    async fn test_load_replaces_and_scopes_to_owner() {
        let remote = MemoryStore::new();
        remote.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        remote.seed("items", "bob", json!({ "name": "Paint", "cost": 30.0 }), None);
        let items: Collection<ProjectItem, _> = Collection::new(remote, alice());

        items.load().await.unwrap();
        let names: Vec<String> = items.entities().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Nails".to_string()]);
    }

    #[tokio::test]
    async fn test_update_changes_only_patched_field() {
        let items: Collection<ProjectItem, _> = Collection::new(MemoryStore::new(), alice());
        let id = items.add(lumber()).await.unwrap();
        let before = items.get(&id).unwrap();

        items.update(&id, ItemPatch::cost(75.0)).await.unwrap();

        let after = items.get(&id).unwrap();
        assert_eq!(after.cost, 75.0);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_update_preserves_position() {
        let items: Collection<ProjectItem, _> = Collection::new(MemoryStore::new(), alice());
        let first = items.add(lumber()).await.unwrap();
        items
            .add(ItemFields { name: "Nails".into(), cost: 5.0 })
            .await
            .unwrap();

        items
            .update(&first, ItemPatch { name: Some("Oak".into()), cost: None })
            .await
            .unwrap();
        assert_eq!(items.entities()[0].name, "Oak");
    }

    #[tokio::test]
    async fn test_update_of_unheld_record_is_silent() {
        let remote = MemoryStore::new();
        let id = remote.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        let items: Collection<ProjectItem, _> = Collection::new(remote, alice());

        items.update(&id, ItemPatch::cost(9.0)).await.unwrap();
        assert!(items.entities().is_empty());
        assert_eq!(items.error(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_locally() {
        let items: Collection<ProjectItem, _> = Collection::new(MemoryStore::new(), alice());
        let id = items.add(lumber()).await.unwrap();

        items.delete(&id).await.unwrap();
        assert!(items.get(&id).is_none());

        items.delete("never-existed").await.unwrap();
        assert!(items.get("never-existed").is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_contents_until_next_success() {
        let remote = MemoryStore::new();
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        items.add(lumber()).await.unwrap();

        remote.fail_next("network down");
        assert_eq!(
            items.load().await,
            Err(StoreError::RemoteUnavailable("Failed to fetch items".into()))
        );
        assert_eq!(items.entities().len(), 1);
        assert_eq!(
            items.status(),
            Status::Failed(OpKind::Load, "Failed to fetch items".into())
        );
        assert_eq!(items.snapshot().load_error(), Some("Failed to fetch items"));

        items
            .add(ItemFields { name: "Nails".into(), cost: 5.0 })
            .await
            .unwrap();
        assert_eq!(items.error(), None);
        assert_eq!(items.status(), Status::Idle);
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_entities() {
        let remote = MemoryStore::new();
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        let id = items.add(lumber()).await.unwrap();

        remote.fail_next("quota");
        assert!(items.update(&id, ItemPatch::cost(1.0)).await.is_err());
        assert_eq!(items.error(), Some("Failed to update item".into()));

        remote.fail_next("quota");
        assert!(items.delete(&id).await.is_err());
        assert_eq!(items.error(), Some("Failed to delete item".into()));

        remote.fail_next("quota");
        assert!(items.add(lumber()).await.is_err());
        assert_eq!(items.error(), Some("Failed to add item".into()));

        assert_eq!(items.entities().len(), 1);
        assert_eq!(items.get(&id).unwrap().cost, 120.0);
    }

    #[tokio::test]
    async fn test_operations_require_session() {
        let items: Collection<ProjectItem, _> =
            Collection::new(MemoryStore::new(), SessionHandle::new());

        assert_eq!(items.load().await, Err(StoreError::Unauthenticated));
        assert_eq!(
            items.status(),
            Status::Failed(OpKind::Load, "User not authenticated".into())
        );
        assert_eq!(items.add(lumber()).await, Err(StoreError::Unauthenticated));
        assert!(!items.is_loading());
    }

    #[tokio::test]
    async fn test_status_names_in_flight_operation() {
        let remote = GatedStore::new(MemoryStore::new());
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());

        let release = remote.hold_next();
        let add = items.add(lumber());
        let probe = async {
            assert_eq!(items.status(), Status::Loading(OpKind::Add));
            assert!(items.is_loading());
            release.send(()).unwrap();
        };
        let (added, ()) = tokio::join!(add, probe);
        added.unwrap();
        assert_eq!(items.status(), Status::Idle);
    }

    #[tokio::test]
    async fn test_pending_tracks_target_id() {
        let remote = GatedStore::new(MemoryStore::new());
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        let id = items.add(lumber()).await.unwrap();

        let release = remote.hold_next();
        let delete = items.delete(&id);
        let probe = async {
            assert!(items.is_pending(&id));
            assert_eq!(items.status(), Status::Loading(OpKind::Delete));
            release.send(()).unwrap();
        };
        let (deleted, ()) = tokio::join!(delete, probe);
        deleted.unwrap();
        assert!(!items.is_pending(&id));
    }

    #[tokio::test]
    async fn test_load_does_not_resurrect_later_delete() {
        let memory = MemoryStore::new();
        let id = memory.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        let remote = GatedStore::new(memory);
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        items.load().await.unwrap();

        // The load reads the document, then its response is held back while
        // the delete completes.
        let release = remote.hold_next();
        let load = items.load();
        let delete = async {
            items.delete(&id).await.unwrap();
            release.send(()).unwrap();
        };
        let (loaded, ()) = tokio::join!(load, delete);
        loaded.unwrap();

        assert!(items.get(&id).is_none());
    }

    #[tokio::test]
    async fn test_load_keeps_newer_local_update() {
        let memory = MemoryStore::new();
        let id = memory.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        let remote = GatedStore::new(memory);
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        items.load().await.unwrap();

        let release = remote.hold_next();
        let load = items.load();
        let update = async {
            items.update(&id, ItemPatch::cost(8.0)).await.unwrap();
            release.send(()).unwrap();
        };
        let (loaded, ()) = tokio::join!(load, update);
        loaded.unwrap();

        assert_eq!(items.get(&id).unwrap().cost, 8.0);
    }

    #[tokio::test]
    async fn test_load_keeps_records_added_after_it() {
        let remote = GatedStore::new(MemoryStore::new());
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());

        let release = remote.hold_next();
        let load = items.load();
        let add = async {
            let id = items.add(lumber()).await.unwrap();
            release.send(()).unwrap();
            id
        };
        let (loaded, id) = tokio::join!(load, add);
        loaded.unwrap();

        assert!(items.get(&id).is_some());
    }

    #[tokio::test]
    async fn test_add_finishing_after_load_keeps_one_copy() {
        let remote = GatedStore::new(MemoryStore::new());
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());

        // The insert lands remotely but its response is held until a later
        // load has already brought the new document back.
        let release = remote.hold_next();
        let add = items.add(lumber());
        let load = async {
            items.load().await.unwrap();
            release.send(()).unwrap();
        };
        let (added, ()) = tokio::join!(add, load);
        let id = added.unwrap();

        let entities = items.entities();
        assert_eq!(entities.iter().filter(|i| i.id == id).count(), 1);
        assert_eq!(entities.iter().map(|i| i.cost).sum::<f64>(), 120.0);
        assert!(matches!(items.get(&id).unwrap().created_at, CreatedAt::Server(_)));
    }

    #[tokio::test]
    async fn test_load_forgets_settled_mutations() {
        let items: Collection<ProjectItem, _> = Collection::new(MemoryStore::new(), alice());
        let kept = items.add(lumber()).await.unwrap();
        let gone = items
            .add(ItemFields { name: "Nails".into(), cost: 5.0 })
            .await
            .unwrap();
        items.update(&kept, ItemPatch::cost(90.0)).await.unwrap();
        items.delete(&gone).await.unwrap();
        assert_eq!(items.lock().applied.len(), 2);

        items.load().await.unwrap();

        assert!(items.lock().applied.is_empty());
        assert_eq!(items.get(&kept).unwrap().cost, 90.0);
        assert!(items.get(&gone).is_none());
    }

    #[tokio::test]
    async fn test_load_keeps_sequencing_for_older_update_in_flight() {
        let memory = MemoryStore::new();
        let id = memory.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        let remote = GatedStore::new(memory);
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        items.load().await.unwrap();

        let release = remote.hold_next();
        let older = items.update(&id, ItemPatch::cost(10.0));
        let driver = async {
            items.update(&id, ItemPatch::cost(20.0)).await.unwrap();
            items.load().await.unwrap();
            release.send(()).unwrap();
        };
        let (older, ()) = tokio::join!(older, driver);
        older.unwrap();

        assert_eq!(items.get(&id).unwrap().cost, 20.0);
    }

    #[tokio::test]
    async fn test_out_of_order_updates_keep_last_issued() {
        let memory = MemoryStore::new();
        let id = memory.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        let remote = GatedStore::new(memory);
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());
        items.load().await.unwrap();

        let first_gate = remote.hold_next();
        let second_gate = remote.hold_next();
        let first = items.update(&id, ItemPatch::cost(10.0));
        let second = items.update(&id, ItemPatch::cost(20.0));
        let driver = async {
            second_gate.send(()).unwrap();
            tokio::task::yield_now().await;
            first_gate.send(()).unwrap();
        };
        let (a, b, ()) = tokio::join!(first, second, driver);
        a.unwrap();
        b.unwrap();

        assert_eq!(items.get(&id).unwrap().cost, 20.0);
        assert!(!items.is_loading());
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let memory = MemoryStore::new();
        memory.seed("items", "alice", json!({ "name": "Nails", "cost": 5.0 }), None);
        let remote = GatedStore::new(memory.clone());
        let items: Collection<ProjectItem, _> = Collection::new(remote.clone(), alice());

        let release = remote.hold_next();
        let old_load = items.load();
        let new_load = async {
            memory.seed("items", "alice", json!({ "name": "Paint", "cost": 30.0 }), None);
            items.load().await.unwrap();
            release.send(()).unwrap();
        };
        let (old, ()) = tokio::join!(old_load, new_load);
        old.unwrap();

        assert_eq!(items.entities().len(), 2);
    }
}
