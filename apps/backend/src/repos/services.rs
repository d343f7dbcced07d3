//! The read-only `services` collection. Its documents are seeded outside
//! this service and carry no schema beyond an optional `Deadline`.

use crate::error::AppError;
use crate::models::post::DEADLINE_FIELD;
use crate::store::{Collection, DocumentStore, SortSpec, StoredDocument};

pub async fn list_by_deadline(store: &dyn DocumentStore) -> Result<Vec<StoredDocument>, AppError> {
    Ok(store
        .list_all(Collection::Services, &SortSpec::ascending(DEADLINE_FIELD))
        .await?)
}
