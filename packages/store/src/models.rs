//! # Domain models for project line items and miscellaneous costs
//!
//! Both record kinds are structurally parallel: a server-assigned `id`, one
//! required text field, one strictly-positive amount, and a creation timestamp.
//! Each kind comes with two payload types:
//!
//! | Record | Creation payload | Partial update |
//! |--------|------------------|----------------|
//! | [`ProjectItem`] | [`ItemFields`] | [`ItemPatch`] |
//! | [`OtherCost`] | [`CostFields`] | [`CostPatch`] |
//!
//! Patches skip absent fields when serialised, so they double as the body of
//! a partial document update.
//!
//! ## Timestamps
//!
//! The document store assigns the creation time, but never echoes it back on
//! insert. [`CreatedAt`] makes that explicit: a freshly added record carries a
//! client-side [`CreatedAt::Estimated`] value until the next load replaces it
//! with the authoritative [`CreatedAt::Server`] one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::remote::{Document, RemoteError};

/// Collection holding [`ProjectItem`] documents.
pub const ITEMS_COLLECTION: &str = "items";
/// Collection holding [`OtherCost`] documents.
pub const COSTS_COLLECTION: &str = "costs";
/// Every collection the document store accepts.
pub const COLLECTIONS: [&str; 2] = [ITEMS_COLLECTION, COSTS_COLLECTION];

/// Creation time of a record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum CreatedAt {
    /// Timestamp recorded by the document store.
    Server(DateTime<Utc>),
    /// Client clock reading taken when the insert succeeded. Replaced by the
    /// server value on the next load.
    Estimated(DateTime<Utc>),
    /// The stored document carried no usable timestamp.
    Unknown,
}

impl CreatedAt {
    pub fn estimate_now() -> Self {
        CreatedAt::Estimated(Utc::now())
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CreatedAt::Server(ts) | CreatedAt::Estimated(ts) => Some(*ts),
            CreatedAt::Unknown => None,
        }
    }

    /// Milliseconds since the Unix epoch; `Unknown` sorts as epoch 0.
    pub fn epoch_millis(&self) -> i64 {
        self.datetime().map(|ts| ts.timestamp_millis()).unwrap_or(0)
    }

    /// True while the value is still a client estimate.
    pub fn is_pending(&self) -> bool {
        matches!(self, CreatedAt::Estimated(_))
    }
}

impl From<Option<DateTime<Utc>>> for CreatedAt {
    fn from(ts: Option<DateTime<Utc>>) -> Self {
        ts.map(CreatedAt::Server).unwrap_or(CreatedAt::Unknown)
    }
}

/// A project line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub created_at: CreatedAt,
}

/// Fields supplied when creating a [`ProjectItem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub cost: f64,
}

/// Partial update of a [`ProjectItem`]. Only `Some` fields are sent and applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl ItemPatch {
    pub fn cost(cost: f64) -> Self {
        Self {
            cost: Some(cost),
            ..Self::default()
        }
    }
}

impl From<ItemFields> for ItemPatch {
    fn from(fields: ItemFields) -> Self {
        Self {
            name: Some(fields.name),
            cost: Some(fields.cost),
        }
    }
}

/// A miscellaneous project cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OtherCost {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub created_at: CreatedAt,
}

/// Fields supplied when creating an [`OtherCost`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostFields {
    pub description: String,
    pub amount: f64,
}

/// Partial update of an [`OtherCost`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl CostPatch {
    pub fn amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }
}

impl From<CostFields> for CostPatch {
    fn from(fields: CostFields) -> Self {
        Self {
            description: Some(fields.description),
            amount: Some(fields.amount),
        }
    }
}

impl Record for ProjectItem {
    type Fields = ItemFields;
    type Patch = ItemPatch;

    const COLLECTION: &'static str = ITEMS_COLLECTION;
    const SINGULAR: &'static str = "item";
    const PLURAL: &'static str = "items";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &CreatedAt {
        &self.created_at
    }

    fn from_fields(id: String, fields: ItemFields, created_at: CreatedAt) -> Self {
        Self {
            id,
            name: fields.name,
            cost: fields.cost,
            created_at,
        }
    }

    fn from_document(doc: Document) -> Result<Self, RemoteError> {
        let fields: ItemFields = doc.decode_body()?;
        Ok(Self::from_fields(doc.id, fields, doc.created_at.into()))
    }

    fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
    }
}

impl Record for OtherCost {
    type Fields = CostFields;
    type Patch = CostPatch;

    const COLLECTION: &'static str = COSTS_COLLECTION;
    const SINGULAR: &'static str = "cost";
    const PLURAL: &'static str = "costs";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &CreatedAt {
        &self.created_at
    }

    fn from_fields(id: String, fields: CostFields, created_at: CreatedAt) -> Self {
        Self {
            id,
            description: fields.description,
            amount: fields.amount,
            created_at,
        }
    }

    fn from_document(doc: Document) -> Result<Self, RemoteError> {
        let fields: CostFields = doc.decode_body()?;
        Ok(Self::from_fields(doc.id, fields, doc.created_at.into()))
    }

    fn apply(&mut self, patch: &CostPatch) {
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }
}

/// The signed-in user as reported by the authentication provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl User {
    /// Display name, falling back to the email address.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_serialises_only_present_fields() {
        let body = serde_json::to_value(ItemPatch::cost(75.0)).unwrap();
        assert_eq!(body, json!({ "cost": 75.0 }));

        let body = serde_json::to_value(CostPatch::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn apply_leaves_absent_fields_alone() {
        let mut item = ProjectItem {
            id: "a".into(),
            name: "Lumber".into(),
            cost: 120.0,
            created_at: CreatedAt::Unknown,
        };
        item.apply(&ItemPatch::cost(75.0));
        assert_eq!(item.name, "Lumber");
        assert_eq!(item.cost, 75.0);
        assert_eq!(item.id, "a");
    }

    #[test]
    fn document_without_timestamp_is_unknown() {
        let doc = Document {
            id: "c1".into(),
            owner_id: "u1".into(),
            created_at: None,
            body: json!({ "description": "Permit", "amount": 40.0 }),
        };
        let cost = OtherCost::from_document(doc).unwrap();
        assert_eq!(cost.created_at, CreatedAt::Unknown);
        assert_eq!(cost.created_at.epoch_millis(), 0);
        assert_eq!(cost.description, "Permit");
    }

    #[test]
    fn document_missing_field_is_malformed() {
        let doc = Document {
            id: "i1".into(),
            owner_id: "u1".into(),
            created_at: None,
            body: json!({ "name": "Nails" }),
        };
        assert!(matches!(
            ProjectItem::from_document(doc),
            Err(RemoteError::Malformed { .. })
        ));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = User {
            uid: "u".into(),
            email: Some("a@b.co".into()),
            display_name: None,
        };
        assert_eq!(user.display_name_or_email(), "a@b.co");
    }
}
