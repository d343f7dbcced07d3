//! Document store facade.
//!
//! Collections hold schemaless JSON objects keyed by a store-generated id.
//! Handlers and repositories only see the [`DocumentStore`] trait; the
//! concrete backend is chosen at startup and injected through `AppState`.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod sea;

pub use memory::MemoryStore;
pub use sea::SeaStore;

/// A stored JSON object without its id.
pub type Document = Map<String, Value>;

/// Key under which the id is rendered in responses.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Posts,
    Signups,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Services, Collection::Posts, Collection::Signups];

    /// Storage name; kept compatible with existing data sets.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Posts => "addPosts",
            Collection::Signups => "beVolunteer",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        raw.parse()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A document together with its id, serialized as `{"_id": ..., ...body}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub body: Document,
}

/// Result of an id lookup. Absence is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub ascending: bool,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl InsertOutcome {
    pub fn new(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<DocumentId>,
}

impl UpdateOutcome {
    pub fn replaced(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_count: 0,
            upserted_id: None,
        }
    }

    pub fn upserted(id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed document id: {0}")]
    InvalidId(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Operations every document store backend provides.
///
/// All calls are independent; no operation spans more than one document
/// except the read-only listings.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name for logs and health output.
    fn backend_name(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Persist `body` under a fresh id.
    async fn insert(
        &self,
        collection: Collection,
        body: Document,
    ) -> Result<InsertOutcome, StoreError>;

    /// Every document, ordered by the value at `sort.field`. Documents
    /// missing the field come last; ties keep insertion order.
    async fn list_all(
        &self,
        collection: Collection,
        sort: &SortSpec,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Documents whose `field` is the string `value`, in insertion order.
    async fn list_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Documents whose string `field` contains `needle`, ignoring case.
    /// `needle` is literal text, not a pattern.
    async fn search(
        &self,
        collection: Collection,
        field: &str,
        needle: &str,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Lookup<StoredDocument>, StoreError>;

    /// Replace the whole document at `id`, creating it when absent.
    async fn replace_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        body: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Remove the document at `id`; a missing id yields `deleted_count == 0`.
    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteOutcome, StoreError>;
}

/// The id lives outside the body; a caller-supplied `_id` is discarded.
pub(crate) fn strip_id(mut body: Document) -> Document {
    body.remove(ID_FIELD);
    body
}
