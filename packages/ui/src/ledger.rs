//! # Ledger — the per-session project book as a Dioxus context
//!
//! [`LedgerProvider`] mirrors the auth state into a [`SessionHandle`], opens a
//! [`ProjectBook`] when a user signs in, loads it once, and drops it when the
//! user signs out or changes. Components never hold the book; they read the
//! `items`/`costs` snapshot signals and call the [`Ledger`] methods, which copy
//! fresh snapshots after the operation starts and again after it settles.

use std::future::Future;
use std::rc::Rc;
use std::task::Poll;

use dioxus::prelude::*;
use store::{
    CollectionState, CostFields, CostPatch, ItemFields, ItemPatch, OtherCost, ProjectBook,
    ProjectItem, ProjectTotals, SessionHandle, StoreError,
};

use crate::notifications::{notify, use_notifications, NoticeLevel, Notifications};
use crate::{use_auth, ApiRemote};

type Book = ProjectBook<ApiRemote>;

#[derive(Clone, Copy, PartialEq)]
pub struct Ledger {
    book: Signal<Option<Rc<Book>>>,
    owner: Signal<Option<String>>,
    pub items: Signal<CollectionState<ProjectItem>>,
    pub costs: Signal<CollectionState<OtherCost>>,
}

pub fn use_ledger() -> Ledger {
    use_context::<Ledger>()
}

impl Ledger {
    fn book(&self) -> Result<Rc<Book>, StoreError> {
        self.book.peek().clone().ok_or(StoreError::Unauthenticated)
    }

    fn refresh(self) {
        let (mut items, mut costs) = (self.items, self.costs);
        match self.book.peek().as_ref() {
            Some(book) => {
                items.set(book.items.snapshot());
                costs.set(book.costs.snapshot());
            }
            None => {
                items.set(CollectionState::default());
                costs.set(CollectionState::default());
            }
        }
    }

    /// Run a collection operation, publishing its pending state after the
    /// first poll and its outcome once it completes.
    async fn drive<T>(self, op: impl Future<Output = T>) -> T {
        let mut op = std::pin::pin!(op);
        if let Poll::Ready(out) = futures::poll!(op.as_mut()) {
            self.refresh();
            return out;
        }
        self.refresh();
        let out = op.await;
        self.refresh();
        out
    }

    fn replace(self, owner: Option<String>, book: Option<Book>) {
        let (mut book_signal, mut owner_signal) = (self.book, self.owner);
        owner_signal.set(owner);
        book_signal.set(book.map(Rc::new));
        self.refresh();
    }

    pub async fn load_all(self) -> Result<(), StoreError> {
        let book = self.book()?;
        self.drive(book.load_all()).await
    }

    /// Load both collections and raise an error toast if that fails.
    pub async fn reload(self, mut notifications: Signal<Notifications>) {
        let result = self.load_all().await;
        if let Err(e) = &result {
            tracing::error!("Failed to load project data: {}", e);
        }
        if let Some((title, description)) = load_failure_notice(&result) {
            notify(&mut notifications, NoticeLevel::Error, title, Some(description));
        }
    }

    pub async fn add_item(self, fields: ItemFields) -> Result<String, StoreError> {
        let book = self.book()?;
        self.drive(book.items.add(fields)).await
    }

    pub async fn update_item(self, id: String, patch: ItemPatch) -> Result<(), StoreError> {
        let book = self.book()?;
        self.drive(book.items.update(&id, patch)).await
    }

    pub async fn delete_item(self, id: String) -> Result<(), StoreError> {
        let book = self.book()?;
        self.drive(book.items.delete(&id)).await
    }

    pub async fn add_cost(self, fields: CostFields) -> Result<String, StoreError> {
        let book = self.book()?;
        self.drive(book.costs.add(fields)).await
    }

    pub async fn update_cost(self, id: String, patch: CostPatch) -> Result<(), StoreError> {
        let book = self.book()?;
        self.drive(book.costs.update(&id, patch)).await
    }

    pub async fn delete_cost(self, id: String) -> Result<(), StoreError> {
        let book = self.book()?;
        self.drive(book.costs.delete(&id)).await
    }

    /// Totals over the current snapshots. Subscribes the caller to both.
    pub fn totals(&self) -> ProjectTotals {
        ProjectTotals::compute(&self.items.read().entities, &self.costs.read().entities)
    }
}

#[component]
pub fn LedgerProvider(children: Element) -> Element {
    let auth = use_auth();
    let session = use_context_provider(SessionHandle::new);
    let notifications = use_notifications();
    let ledger = use_context_provider(|| Ledger {
        book: Signal::new(None),
        owner: Signal::new(None),
        items: Signal::new(CollectionState::default()),
        costs: Signal::new(CollectionState::default()),
    });

    let _loader = use_resource(move || {
        let session = session.clone();
        async move {
            let state = auth();
            if state.loading {
                return;
            }
            let user: Option<store::User> = state.user.map(Into::into);
            let uid = user.as_ref().map(|u| u.uid.clone());
            session.on_session_changed(user);

            if *ledger.owner.peek() == uid {
                return;
            }
            let book = uid.as_ref().map(|_| ProjectBook::open(ApiRemote, session.clone()));
            ledger.replace(uid, book);

            if ledger.book.peek().is_some() {
                ledger.reload(notifications).await;
            }
        }
    });

    rsx! {
        {children}
    }
}

fn load_failure_notice(result: &Result<(), StoreError>) -> Option<(&'static str, &'static str)> {
    result.as_ref().err().map(|_| {
        (
            "Error loading data",
            "There was a problem loading your project data. Please refresh the page.",
        )
    })
}
