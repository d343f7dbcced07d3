// SeaStore against a live PostgreSQL database.
//
// Ignored by default. To run:
//   TEST_DB=volunteer_test APP_DB_USER=... APP_DB_PASSWORD=... \
//   POSTGRES_HOST=localhost POSTGRES_PORT=5432 \
//   cargo test --test store_tests -- --ignored
//
// The database name must end in `_test`. Migrations run on connect and every
// test uses fresh ids, so runs never collide.

use backend::config::db::DbProfile;
use backend::infra::db::bootstrap_db;
use backend::store::{
    Collection, Document, DocumentId, DocumentStore, Lookup, SeaStore, SortSpec, StoreError,
};
use migration::{count_applied_migrations, Migrator, MigratorTrait};
use serde_json::json;
use uuid::Uuid;

async fn store() -> SeaStore {
    let db = bootstrap_db(DbProfile::Test)
        .await
        .expect("test database should be reachable");
    SeaStore::new(db)
}

/// A tag unique to this run, used to scope searches and filters.
fn tag() -> String {
    Uuid::new_v4().simple().to_string()
}

fn post(title: &str, organizer: &str, deadline: &str) -> Document {
    let mut doc = Document::new();
    doc.insert("postTitle".into(), json!(title));
    doc.insert("organizerEmail".into(), json!(organizer));
    doc.insert("Deadline".into(), json!(deadline));
    doc
}

#[tokio::test]
#[ignore]
async fn test_insert_find_replace_delete() {
    let store = store().await;
    store.ping().await.unwrap();

    let created = store
        .insert(Collection::Posts, post("Food bank", "o@example.org", "2025-04-01T00:00:00Z"))
        .await
        .unwrap();
    let id = created.inserted_id;

    let Lookup::Found(found) = store.find_by_id(Collection::Posts, id).await.unwrap() else {
        panic!("inserted post should be found");
    };
    assert_eq!(found.body["postTitle"], "Food bank");

    // Same id, other collection: invisible
    assert_eq!(
        store.find_by_id(Collection::Signups, id).await.unwrap(),
        Lookup::NotFound
    );

    let same = post("Food bank", "o@example.org", "2025-04-01T00:00:00Z");
    let outcome = store.replace_by_id(Collection::Posts, id, same).await.unwrap();
    assert_eq!((outcome.matched_count, outcome.modified_count), (1, 0));

    let changed = post("Food bank v2", "o@example.org", "2025-04-02T00:00:00Z");
    let outcome = store.replace_by_id(Collection::Posts, id, changed).await.unwrap();
    assert_eq!((outcome.matched_count, outcome.modified_count), (1, 1));

    assert_eq!(store.delete_by_id(Collection::Posts, id).await.unwrap().deleted_count, 1);
    assert_eq!(store.delete_by_id(Collection::Posts, id).await.unwrap().deleted_count, 0);
}

#[tokio::test]
#[ignore]
async fn test_replace_upserts_missing_id() {
    let store = store().await;
    let id = DocumentId::new();

    let outcome = store
        .replace_by_id(Collection::Posts, id, post("Upserted", "o@example.org", "2025-01-01T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(outcome.upserted_id, Some(id));
    assert!(store.find_by_id(Collection::Posts, id).await.unwrap().is_found());

    // The id is taken now; another collection cannot claim it
    let err = store
        .replace_by_id(Collection::Signups, id, Document::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    store.delete_by_id(Collection::Posts, id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_search_and_filter() {
    let store = store().await;
    let tag = tag();
    let organizer = format!("{tag}@example.org");

    let mut ids = Vec::new();
    for title in [
        format!("Volunteer Drive {tag}"),
        format!("VOLUNTEER DRIVE {tag}"),
        format!("50% off {tag}"),
    ] {
        let created = store
            .insert(Collection::Posts, post(&title, &organizer, "2025-01-01T00:00:00Z"))
            .await
            .unwrap();
        ids.push(created.inserted_id);
    }

    let hits = store
        .search(Collection::Posts, "postTitle", &format!("drive {tag}"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);

    // LIKE wildcards are escaped
    let hits = store
        .search(Collection::Posts, "postTitle", &format!("% off {tag}"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    let hits = store
        .search(Collection::Posts, "postTitle", &format!("_ drive {tag}"))
        .await
        .unwrap();
    assert!(hits.is_empty());

    let mine = store
        .list_where(Collection::Posts, "organizerEmail", &organizer)
        .await
        .unwrap();
    assert_eq!(mine.iter().map(|d| d.id).collect::<Vec<_>>(), ids);

    for id in ids {
        store.delete_by_id(Collection::Posts, id).await.unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn test_listing_orders_by_deadline_missing_last() {
    let store = store().await;
    let tag = tag();

    let mut undated = Document::new();
    undated.insert("serviceName".into(), json!(format!("undated {tag}")));
    let undated = store.insert(Collection::Services, undated).await.unwrap().inserted_id;

    let mut ids = Vec::new();
    for deadline in ["2031-06-01T00:00:00Z", "2031-01-01T00:00:00Z"] {
        let mut doc = Document::new();
        doc.insert("serviceName".into(), json!(tag.clone()));
        doc.insert("Deadline".into(), json!(deadline));
        ids.push(store.insert(Collection::Services, doc).await.unwrap().inserted_id);
    }

    let listed: Vec<DocumentId> = store
        .list_all(Collection::Services, &SortSpec::ascending("Deadline"))
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .filter(|id| *id == undated || ids.contains(id))
        .collect();
    assert_eq!(listed, vec![ids[1], ids[0], undated]);

    for id in ids.into_iter().chain([undated]) {
        store.delete_by_id(Collection::Services, id).await.unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn test_bootstrap_applies_every_migration() {
    let db = bootstrap_db(DbProfile::Test)
        .await
        .expect("test database should be reachable");
    assert_eq!(
        count_applied_migrations(&db).await.unwrap(),
        Migrator::migrations().len()
    );
}
