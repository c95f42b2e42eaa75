use crate::entities::order::OrderKey;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the callers of the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("order {0} is already tracked")]
    DuplicateOrder(OrderKey),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Nothing was persisted for the interrupted cycle.
    #[error("refresh cycle aborted: {0}")]
    RefreshAborted(String),

    /// The attempted change is not durably applied.
    #[error("failed to write {path:?}: {source}")]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a status could not be fetched. Recovered as `OrderStatus::Error` by `StatusApi::fetch_status`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("status request failed: {0:#}")]
    Request(#[from] anyhow::Error),

    #[error("unparseable status payload: {0}")]
    Parse(String),
}
