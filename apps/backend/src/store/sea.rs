//! PostgreSQL document store.
//!
//! Every collection lives in the `documents` table as a jsonb body tagged
//! with its collection name. Field filters, search and ordering are pushed
//! down to jsonb operators.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, NullOrdering, Order};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionTrait,
};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::warn;

use super::{
    strip_id, Collection, DeleteOutcome, Document, DocumentId, DocumentStore, InsertOutcome,
    Lookup, SortSpec, StoreError, StoredDocument, UpdateOutcome,
};
use crate::entities::documents;

pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(
        &self,
        collection: Collection,
        filter: Option<sea_orm::sea_query::SimpleExpr>,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut query =
            documents::Entity::find().filter(documents::Column::Collection.eq(collection.name()));

        if let Some(filter) = filter {
            query = query.filter(filter);
        }

        if let Some(sort) = sort {
            let order = if sort.ascending { Order::Asc } else { Order::Desc };
            query = query.order_by_with_nulls(
                Expr::cust_with_values("body -> ?", [sort.field.clone()]),
                order,
                NullOrdering::Last,
            );
        }

        query
            .order_by_asc(documents::Column::Seq)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(to_stored)
            .collect()
    }
}

/// Escape LIKE wildcards so the needle is matched literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_stored(row: documents::Model) -> Result<StoredDocument, StoreError> {
    match row.body {
        Value::Object(body) => Ok(StoredDocument {
            id: DocumentId::from(row.id),
            body,
        }),
        other => Err(StoreError::Backend(format!(
            "document {} has a non-object body: {}",
            row.id, other
        ))),
    }
}

fn new_row(collection: Collection, id: DocumentId, body: Document) -> documents::ActiveModel {
    documents::ActiveModel {
        id: Set(id.as_uuid()),
        seq: NotSet,
        collection: Set(collection.name().to_string()),
        body: Set(Value::Object(body)),
        created_at: Set(OffsetDateTime::now_utc()),
    }
}

fn map_db_err(err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return StoreError::Conflict(detail);
    }

    match &err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl DocumentStore for SeaStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await.map_err(map_db_err)
    }

    async fn insert(
        &self,
        collection: Collection,
        body: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let id = DocumentId::new();
        documents::Entity::insert(new_row(collection, id, strip_id(body)))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(InsertOutcome::new(id))
    }

    async fn list_all(
        &self,
        collection: Collection,
        sort: &SortSpec,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.fetch(collection, None, Some(sort)).await
    }

    async fn list_where(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let filter = Expr::cust_with_values(
            "body @> jsonb_build_object(CAST(? AS text), CAST(? AS text))",
            [field.to_string(), value.to_string()],
        );
        self.fetch(collection, Some(filter), None).await
    }

    async fn search(
        &self,
        collection: Collection,
        field: &str,
        needle: &str,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let filter = Expr::cust_with_values(
            "jsonb_typeof(body -> ?) = 'string' AND body ->> ? ILIKE ?",
            [
                field.to_string(),
                field.to_string(),
                format!("%{}%", escape_like(needle)),
            ],
        );
        self.fetch(collection, Some(filter), None).await
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Lookup<StoredDocument>, StoreError> {
        let row = documents::Entity::find_by_id(id.as_uuid())
            .filter(documents::Column::Collection.eq(collection.name()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match row {
            Some(row) => Ok(Lookup::Found(to_stored(row)?)),
            None => Ok(Lookup::NotFound),
        }
    }

    async fn replace_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
        body: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let body = strip_id(body);
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = documents::Entity::find_by_id(id.as_uuid())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(map_db_err)?;

        let outcome = match existing {
            Some(row) if row.collection != collection.name() => {
                warn!(%id, owner = %row.collection, requested = %collection, "id reused across collections");
                return Err(StoreError::Conflict(format!(
                    "id {id} belongs to another collection"
                )));
            }
            Some(row) => {
                let modified = row.body.as_object() != Some(&body);
                if modified {
                    documents::Entity::update_many()
                        .col_expr(documents::Column::Body, Expr::value(Value::Object(body)))
                        .filter(documents::Column::Id.eq(id.as_uuid()))
                        .exec(&txn)
                        .await
                        .map_err(map_db_err)?;
                }
                UpdateOutcome::replaced(modified)
            }
            None => {
                documents::Entity::insert(new_row(collection, id, body))
                    .exec_without_returning(&txn)
                    .await
                    .map_err(map_db_err)?;
                UpdateOutcome::upserted(id)
            }
        };

        txn.commit().await.map_err(map_db_err)?;
        Ok(outcome)
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteOutcome, StoreError> {
        let result = documents::Entity::delete_many()
            .filter(documents::Column::Id.eq(id.as_uuid()))
            .filter(documents::Column::Collection.eq(collection.name()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(DeleteOutcome::new(result.rows_affected))
    }
}
