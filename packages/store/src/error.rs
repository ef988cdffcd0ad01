/// Failure of a [`crate::Collection`] operation.
///
/// Every remote fault collapses into `RemoteUnavailable` with a message naming
/// the operation; the underlying cause is logged, not surfaced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("User not authenticated")]
    Unauthenticated,
    #[error("{0}")]
    RemoteUnavailable(String),
}
