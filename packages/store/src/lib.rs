pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod record;
pub mod remote;
pub mod session;
pub mod sort;
pub mod totals;
pub mod validate;

mod memory;
pub use memory::MemoryStore;

#[cfg(test)]
mod testing;

pub use collection::{Collection, CollectionState, OpKind, PendingOp, Status};
pub use config::TrackerConfig;
pub use error::StoreError;
pub use models::{CostFields, CostPatch, CreatedAt, ItemFields, ItemPatch, OtherCost, ProjectItem, User};
pub use record::Record;
pub use remote::{Document, RemoteError, RemoteStore};
pub use session::{ProjectBook, SessionHandle};
pub use sort::{CostSortField, ItemSortField, SortDirection, SortOption};
pub use totals::ProjectTotals;
