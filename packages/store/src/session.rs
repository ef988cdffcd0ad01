//! # Session mirror and the per-session project book
//!
//! The authentication provider owns the session; this crate only mirrors its
//! session-changed callback into a [`SessionHandle`]. A [`ProjectBook`] is
//! opened when a user signs in and dropped when they sign out, so no record
//! data outlives the session that loaded it.

use std::sync::{Arc, Mutex, PoisonError};

use crate::collection::Collection;
use crate::error::StoreError;
use crate::models::{OtherCost, ProjectItem, User};
use crate::remote::RemoteStore;
use crate::totals::ProjectTotals;

/// Shared view of the provider's current session.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    user: Arc<Mutex<Option<User>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Arc::new(Mutex::new(Some(user))),
        }
    }

    /// Mirror a session-changed notification from the provider.
    pub fn on_session_changed(&self, user: Option<User>) {
        match &user {
            Some(u) => tracing::debug!(uid = %u.uid, "session started"),
            None => tracing::debug!("session ended"),
        }
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }

    pub fn current_user(&self) -> Option<User> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn require_user(&self) -> Result<User, StoreError> {
        self.current_user().ok_or(StoreError::Unauthenticated)
    }
}

/// Both record collections of one signed-in user.
pub struct ProjectBook<S: RemoteStore + Clone> {
    pub items: Collection<ProjectItem, S>,
    pub costs: Collection<OtherCost, S>,
    session: SessionHandle,
}

impl<S: RemoteStore + Clone> ProjectBook<S> {
    pub fn open(remote: S, session: SessionHandle) -> Self {
        Self {
            items: Collection::new(remote.clone(), session.clone()),
            costs: Collection::new(remote, session.clone()),
            session,
        }
    }

    /// Load both collections concurrently. Reports the first failure; each
    /// collection records its own error either way.
    pub async fn load_all(&self) -> Result<(), StoreError> {
        let (items, costs) = futures::join!(self.items.load(), self.costs.load());
        items.and(costs)
    }

    pub fn totals(&self) -> ProjectTotals {
        ProjectTotals::compute(&self.items.entities(), &self.costs.entities())
    }

    pub fn owner(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostFields, ItemFields};
    use crate::MemoryStore;
    use serde_json::json;

    fn alice() -> User {
        User {
            uid: "alice".into(),
            email: Some("alice@example.com".into()),
            display_name: Some("Alice".into()),
        }
    }

    #[tokio::test]
    async fn test_grand_total_across_collections() {
        let remote = MemoryStore::new();
        remote.seed("items", "alice", json!({ "name": "Lumber", "cost": 50.0 }), None);
        remote.seed("items", "alice", json!({ "name": "Nails", "cost": 30.0 }), None);
        remote.seed("costs", "alice", json!({ "description": "Permit", "amount": 20.0 }), None);
        remote.seed("costs", "bob", json!({ "description": "Other", "amount": 999.0 }), None);

        let book = ProjectBook::open(remote, SessionHandle::signed_in(alice()));
        book.load_all().await.unwrap();

        let totals = book.totals();
        assert_eq!(totals.items_total, 80.0);
        assert_eq!(totals.costs_total, 20.0);
        assert_eq!(totals.grand_total, 100.0);
        assert_eq!(totals.entry_count(), 3);
    }

    #[tokio::test]
    async fn test_sign_out_blocks_further_operations() {
        let remote = MemoryStore::new();
        let session = SessionHandle::signed_in(alice());
        let book = ProjectBook::open(remote.clone(), session.clone());

        book.items
            .add(ItemFields { name: "Lumber".into(), cost: 120.0 })
            .await
            .unwrap();

        session.on_session_changed(None);
        assert_eq!(book.owner(), None);
        assert_eq!(
            book.costs
                .add(CostFields { description: "Permit".into(), amount: 40.0 })
                .await,
            Err(StoreError::Unauthenticated)
        );
        assert!(remote.documents("costs").is_empty());
    }

    #[tokio::test]
    async fn test_load_all_reports_failure_but_loads_other_collection() {
        let remote = MemoryStore::new();
        remote.seed("costs", "alice", json!({ "description": "Permit", "amount": 20.0 }), None);
        let book = ProjectBook::open(remote.clone(), SessionHandle::signed_in(alice()));

        // The items load is polled first and consumes the injected fault.
        remote.fail_next("timeout");
        assert!(book.load_all().await.is_err());
        assert_eq!(book.items.error(), Some("Failed to fetch items".to_string()));
        assert_eq!(book.costs.error(), None);
        assert_eq!(book.costs.entities().len(), 1);
    }
}
