use crate::error::AppError;
use crate::models::post::{DEADLINE_FIELD, ORGANIZER_FIELD, TITLE_FIELD};
use crate::models::{to_document, Post, Record};
use crate::repos::{decode, decode_all};
use crate::store::{
    Collection, DeleteOutcome, DocumentId, DocumentStore, InsertOutcome, Lookup, SortSpec,
    UpdateOutcome,
};

const COLLECTION: Collection = Collection::Posts;

pub async fn create(store: &dyn DocumentStore, post: &Post) -> Result<InsertOutcome, AppError> {
    Ok(store.insert(COLLECTION, to_document(post)?).await?)
}

/// All posts, soonest deadline first.
pub async fn list_by_deadline(store: &dyn DocumentStore) -> Result<Vec<Record<Post>>, AppError> {
    let docs = store
        .list_all(COLLECTION, &SortSpec::ascending(DEADLINE_FIELD))
        .await?;
    decode_all(COLLECTION, docs)
}

/// Posts whose title contains `needle`, ignoring case.
pub async fn search_by_title(
    store: &dyn DocumentStore,
    needle: &str,
) -> Result<Vec<Record<Post>>, AppError> {
    let docs = store.search(COLLECTION, TITLE_FIELD, needle).await?;
    decode_all(COLLECTION, docs)
}

pub async fn list_by_organizer(
    store: &dyn DocumentStore,
    organizer_email: &str,
) -> Result<Vec<Record<Post>>, AppError> {
    let docs = store
        .list_where(COLLECTION, ORGANIZER_FIELD, organizer_email)
        .await?;
    decode_all(COLLECTION, docs)
}

pub async fn find(
    store: &dyn DocumentStore,
    id: DocumentId,
) -> Result<Lookup<Record<Post>>, AppError> {
    match store.find_by_id(COLLECTION, id).await? {
        Lookup::Found(doc) => Ok(Lookup::Found(decode(COLLECTION, doc)?)),
        Lookup::NotFound => Ok(Lookup::NotFound),
    }
}

/// Replace the post at `id`, creating it if it does not exist.
pub async fn replace(
    store: &dyn DocumentStore,
    id: DocumentId,
    post: &Post,
) -> Result<UpdateOutcome, AppError> {
    Ok(store.replace_by_id(COLLECTION, id, to_document(post)?).await?)
}

pub async fn delete(store: &dyn DocumentStore, id: DocumentId) -> Result<DeleteOutcome, AppError> {
    Ok(store.delete_by_id(COLLECTION, id).await?)
}
