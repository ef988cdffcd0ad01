//! The seam between a concrete record kind and the generic [`crate::Collection`].

use std::fmt::Debug;

use serde::Serialize;

use crate::models::CreatedAt;
use crate::remote::{Document, RemoteError};

/// A record kind stored in one user-scoped document collection.
pub trait Record: Clone + Debug + PartialEq {
    /// Payload for creating a record (everything but id and timestamp).
    type Fields: Clone + Debug + Serialize;
    /// Payload for a partial update of the mutable fields.
    type Patch: Clone + Debug + Serialize;

    /// Remote collection name.
    const COLLECTION: &'static str;
    /// Human noun used in status messages ("item", "cost").
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> &str;

    fn created_at(&self) -> &CreatedAt;

    fn from_fields(id: String, fields: Self::Fields, created_at: CreatedAt) -> Self;

    fn from_document(doc: Document) -> Result<Self, RemoteError>;

    /// Overwrite the mutable fields present in `patch`.
    fn apply(&mut self, patch: &Self::Patch);
}
