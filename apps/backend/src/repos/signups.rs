use crate::error::AppError;
use crate::models::signup::VOLUNTEER_FIELD;
use crate::models::{to_document, Record, Signup};
use crate::repos::decode_all;
use crate::store::{Collection, DeleteOutcome, DocumentId, DocumentStore, InsertOutcome};

const COLLECTION: Collection = Collection::Signups;

pub async fn create(store: &dyn DocumentStore, signup: &Signup) -> Result<InsertOutcome, AppError> {
    Ok(store.insert(COLLECTION, to_document(signup)?).await?)
}

pub async fn list_by_volunteer(
    store: &dyn DocumentStore,
    volunteer_email: &str,
) -> Result<Vec<Record<Signup>>, AppError> {
    let docs = store
        .list_where(COLLECTION, VOLUNTEER_FIELD, volunteer_email)
        .await?;
    decode_all(COLLECTION, docs)
}

pub async fn delete(store: &dyn DocumentStore, id: DocumentId) -> Result<DeleteOutcome, AppError> {
    Ok(store.delete_by_id(COLLECTION, id).await?)
}
