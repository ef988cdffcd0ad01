//! # Database module — PostgreSQL pool and the document store
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so client (WASM) builds
//! never pull in SQLx.
//!
//! - [`get_pool`] — lazy process-wide `PgPool`, initialised from
//!   `DATABASE_URL` on first use.
//! - [`PgDocumentStore`] — the `documents` table as a [`store::RemoteStore`].

#[cfg(feature = "server")]
mod documents;
#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use documents::PgDocumentStore;
#[cfg(feature = "server")]
pub use pool::get_pool;
