//! Typed access to the collections on top of [`DocumentStore`].
//!
//! Handlers call these free functions with the store borrowed from
//! `AppState`; the functions own the collection names, field names and
//! decoding into [`Record`]s.

pub mod posts;
pub mod services;
pub mod signups;

use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::AppError;
use crate::models::Record;
use crate::state::app_state::AppState;
use crate::store::{Collection, DocumentStore, StoredDocument};

/// The configured store, or 503 when the service started without one.
pub fn require_store(state: &AppState) -> Result<&dyn DocumentStore, AppError> {
    state.store().ok_or_else(AppError::db_unavailable)
}

/// Decode stored documents; writes are validated, so a failure here means
/// the collection holds data this service did not write.
pub(crate) fn decode<T: DeserializeOwned>(
    collection: Collection,
    doc: StoredDocument,
) -> Result<Record<T>, AppError> {
    let id = doc.id;
    Record::from_stored(doc).map_err(|e| {
        error!(%collection, %id, error = %e, "stored document does not decode");
        AppError::internal(format!("{collection}/{id} does not decode: {e}"))
    })
}

pub(crate) fn decode_all<T: DeserializeOwned>(
    collection: Collection,
    docs: Vec<StoredDocument>,
) -> Result<Vec<Record<T>>, AppError> {
    docs.into_iter().map(|doc| decode(collection, doc)).collect()
}
