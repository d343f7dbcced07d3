// Property tests for title search and deadline ordering on the in-memory store.

use backend::store::{Collection, Document, DocumentStore, MemoryStore, SortSpec};
use proptest::prelude::*;
use serde_json::json;

use crate::common::proptest_prelude::proptest_prelude_config;

fn run<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(fut)
}

fn doc(field: &str, value: &str) -> Document {
    let mut doc = Document::new();
    doc.insert(field.to_string(), json!(value));
    doc
}

/// Flip the case of every other character.
fn scramble_case(s: &str) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 0 {
                c.to_uppercase().collect::<String>()
            } else {
                c.to_lowercase().collect::<String>()
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    /// Any substring of a title finds it, whatever the case of either side.
    #[test]
    fn prop_substring_matches_ignoring_case(
        title in "[A-Za-z ]{1,24}",
        start in 0usize..24,
        len in 1usize..8,
    ) {
        let start = start % title.len();
        let end = (start + len).min(title.len());
        let needle = scramble_case(&title[start..end]);

        let hits = run(async {
            let store = MemoryStore::new();
            store
                .insert(Collection::Posts, doc("postTitle", &title.to_uppercase()))
                .await
                .unwrap();
            store.search(Collection::Posts, "postTitle", &needle).await.unwrap()
        });
        prop_assert_eq!(hits.len(), 1);
    }

    /// Regex metacharacters in the needle are matched literally.
    #[test]
    fn prop_metacharacters_are_literal(
        title in "[a-z]{1,12}",
        meta in prop::sample::select(vec![".*", "^", "$", "[a-z]", "(", "\\d", "%", "_"]),
    ) {
        let hits = run(async {
            let store = MemoryStore::new();
            store.insert(Collection::Posts, doc("postTitle", &title)).await.unwrap();
            store.search(Collection::Posts, "postTitle", meta).await.unwrap()
        });
        prop_assert!(hits.is_empty());
    }

    /// Listings come back in non-decreasing deadline order.
    #[test]
    fn prop_listing_is_sorted(days in prop::collection::vec(1u32..=28, 0..12)) {
        let listed = run(async {
            let store = MemoryStore::new();
            for day in &days {
                let deadline = format!("2025-03-{day:02}T00:00:00Z");
                store
                    .insert(Collection::Posts, doc("Deadline", &deadline))
                    .await
                    .unwrap();
            }
            store
                .list_all(Collection::Posts, &SortSpec::ascending("Deadline"))
                .await
                .unwrap()
        });

        let deadlines: Vec<String> = listed
            .iter()
            .map(|d| d.body["Deadline"].as_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(deadlines.len(), days.len());
        prop_assert!(deadlines.windows(2).all(|w| w[0] <= w[1]));
    }
}
