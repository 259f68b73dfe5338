//! Saloon persistence.
//!
//! The in-memory store is the source of truth while the process runs; the
//! snapshot is read once at startup and rewritten after every mutation.

mod saloon_store;
mod snapshot;

pub use saloon_store::*;
pub use snapshot::*;

#[cfg(test)]
pub(crate) use snapshot::memory;

use std::path::Path;
use std::sync::Arc;

use crate::errors::AppError;

/// Open the store backed by the JSON snapshot at `snapshot_path`.
pub async fn init_store(snapshot_path: &Path) -> Result<SaloonStore, AppError> {
    let snapshot = Arc::new(JsonFileSnapshot::new(snapshot_path));
    tracing::debug!("Loading snapshot from {:?}", snapshot.path());
    SaloonStore::open(snapshot).await
}
