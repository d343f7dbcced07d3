//! In-process document store.
//!
//! Backs the test suites and `STORE_BACKEND=memory` deployments. Value
//! ordering follows PostgreSQL's jsonb ordering so both backends sort the
//! same way.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::{
    strip_id, Collection, DeleteOutcome, Document, DocumentId, DocumentStore, InsertOutcome,
    Lookup, SortSpec, StoreError, StoredDocument, UpdateOutcome,
};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(
        &self,
        collection: Collection,
        keep: impl Fn(&StoredDocument) -> bool,
    ) -> Vec<StoredDocument> {
        self.collections
            .read()
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| keep(doc)).cloned().collect())
            .unwrap_or_default()
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Order by the value at `field`; documents without it go last either way.
fn compare_by_field(a: &Document, b: &Document, sort: &SortSpec) -> Ordering {
    match (a.get(&sort.field), b.get(&sort.field)) {
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            if sort.ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        body: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let id = DocumentId::new();
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(StoredDocument {
                id,
                body: strip_id(body),
            });
        Ok(InsertOutcome::new(id))
    }

    async fn list_all(
        &self,
        collection: Collection,
        sort: &SortSpec,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut docs = self.filtered(collection, |_| true);
        // sort_by is stable, so ties keep insertion order
        docs.sort_by(|a, b| compare_by_field(&a.body, &b.body, sort));
        Ok(docs)
    }

    async fn list_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self.filtered(collection, |doc| {
            doc.body.get(field).and_then(Value::as_str) == Some(value)
        }))
    }

    async fn search(
        &self,
        collection: Collection,
        field: &str,
        needle: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let needle = needle.to_lowercase();
        Ok(self.filtered(collection, |doc| {
            doc.body
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        }))
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Lookup<StoredDocument>, StoreError> {
        let found = self
            .collections
            .read()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned());

        Ok(match found {
            Some(doc) => Lookup::Found(doc),
            None => Lookup::NotFound,
        })
    }

    async fn replace_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        body: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let body = strip_id(body);
        let mut collections = self.collections.write();

        // Ids are unique across collections, as in the PostgreSQL backend
        let taken_elsewhere = collections
            .iter()
            .filter(|(name, _)| **name != collection)
            .any(|(_, docs)| docs.iter().any(|doc| doc.id == id));
        if taken_elsewhere {
            return Err(StoreError::Conflict(format!(
                "id {id} belongs to another collection"
            )));
        }

        let docs = collections.entry(collection).or_default();
        match docs.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => {
                let modified = existing.body != body;
                existing.body = body;
                Ok(UpdateOutcome::replaced(modified))
            }
            None => {
                docs.push(StoredDocument { id, body });
                Ok(UpdateOutcome::upserted(id))
            }
        }
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteOutcome::new(0));
        };

        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(DeleteOutcome::new((before - docs.len()) as u64))
    }
}
