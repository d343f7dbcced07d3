use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::json;

use crate::common::{ids, read_json};
use crate::support::fixtures::post_body;
use crate::support::{create_test_app, memory_state};

#[actix_web::test]
async fn test_create_then_get_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/addPosts")
        .set_json(post_body("Beach cleanup", "org@example.org", "2025-05-01"))
        .to_request();
    let created = read_json(test::call_service(&app, req).await).await;
    assert_eq!(created["acknowledged"], true);
    let id = created["insertedId"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/addPosts/{id}"))
        .to_request();
    let post = read_json(test::call_service(&app, req).await).await;

    assert_eq!(post["_id"], id.as_str());
    assert_eq!(post["postTitle"], "Beach cleanup");
    assert_eq!(post["Deadline"], "2025-05-01T00:00:00Z");
    assert_eq!(post["location"], "Community hall");
    Ok(())
}

#[actix_web::test]
async fn test_listing_sorted_by_deadline() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    for (title, deadline) in [
        ("December", "2025-12-01"),
        ("March", "2025-03-15T09:00:00Z"),
        ("January", "2025-01-20"),
        ("March early", "2025-03-15T08:00:00+00:00"),
    ] {
        let req = test::TestRequest::post()
            .uri("/addPosts")
            .set_json(post_body(title, "org@example.org", deadline))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/addPosts").to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["postTitle"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["January", "March early", "March", "December"]);
    Ok(())
}

#[actix_web::test]
async fn test_search_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    for title in ["Volunteer Drive", "VOLUNTEER DRIVE", "Park cleanup"] {
        let req = test::TestRequest::post()
            .uri("/addPosts")
            .set_json(post_body(title, "org@example.org", "2025-05-01"))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/search?search=vol").to_request();
    let hits = read_json(test::call_service(&app, req).await).await;
    let mut titles: Vec<&str> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["postTitle"].as_str().unwrap())
        .collect();
    titles.sort();
    assert_eq!(titles, ["VOLUNTEER DRIVE", "Volunteer Drive"]);

    // Pattern characters are literal text
    let req = test::TestRequest::get().uri("/search?search=.*").to_request();
    let hits = read_json(test::call_service(&app, req).await).await;
    assert_eq!(hits, json!([]));

    // An empty term matches every post
    let req = test::TestRequest::get().uri("/search").to_request();
    let hits = read_json(test::call_service(&app, req).await).await;
    assert_eq!(ids(&hits).len(), 3);
    Ok(())
}

#[actix_web::test]
async fn test_get_missing_and_malformed_ids() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri("/addPosts/6f1c7a3e-7d5b-4f5e-9a51-2b3c4d5e6f70")
        .to_request();
    assert_problem_details_from_service_response(
        test::call_service(&app, req).await,
        "POST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/addPosts/not-an-id")
        .to_request();
    assert_problem_details_from_service_response(
        test::call_service(&app, req).await,
        "INVALID_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_put_replaces_then_upserts() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/addPosts")
        .set_json(post_body("Old title", "org@example.org", "2025-05-01"))
        .to_request();
    let created = read_json(test::call_service(&app, req).await).await;
    let id = created["insertedId"].as_str().unwrap().to_string();

    // Full replace: fields not in the new body are gone
    let req = test::TestRequest::put()
        .uri(&format!("/addPosts/{id}"))
        .set_json(json!({
            "postTitle": "New title",
            "organizerEmail": "org@example.org",
            "Deadline": "2025-06-01"
        }))
        .to_request();
    let outcome = read_json(test::call_service(&app, req).await).await;
    assert_eq!(outcome["matchedCount"], 1);
    assert_eq!(outcome["modifiedCount"], 1);
    assert_eq!(outcome["upsertedCount"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/addPosts/{id}"))
        .to_request();
    let post = read_json(test::call_service(&app, req).await).await;
    assert_eq!(post["postTitle"], "New title");
    assert!(post.get("location").is_none());

    // Missing id: created under that id
    let fresh = "0b0e7e0c-3f4a-4c36-8f5e-7f1d2a9c4b11";
    let req = test::TestRequest::put()
        .uri(&format!("/addPosts/{fresh}"))
        .set_json(post_body("Upserted", "org@example.org", "2025-08-01"))
        .to_request();
    let outcome = read_json(test::call_service(&app, req).await).await;
    assert_eq!(outcome["upsertedCount"], 1);
    assert_eq!(outcome["upsertedId"], fresh);

    let req = test::TestRequest::get()
        .uri(&format!("/addPosts/{fresh}"))
        .to_request();
    let post = read_json(test::call_service(&app, req).await).await;
    assert_eq!(post["postTitle"], "Upserted");
    Ok(())
}

#[actix_web::test]
async fn test_delete_reports_count() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/addPosts")
        .set_json(post_body("Short lived", "org@example.org", "2025-05-01"))
        .to_request();
    let created = read_json(test::call_service(&app, req).await).await;
    let id = created["insertedId"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/addPosts/{id}"))
        .to_request();
    let outcome = read_json(test::call_service(&app, req).await).await;
    assert_eq!(outcome, json!({"acknowledged": true, "deletedCount": 1}));

    let req = test::TestRequest::delete()
        .uri(&format!("/addPosts/{id}"))
        .to_request();
    let outcome = read_json(test::call_service(&app, req).await).await;
    assert_eq!(outcome, json!({"acknowledged": true, "deletedCount": 0}));
    Ok(())
}

#[actix_web::test]
async fn test_invalid_payloads_are_400() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/addPosts")
        .set_json(post_body("Bad deadline", "org@example.org", "whenever"))
        .to_request();
    assert_problem_details_from_service_response(
        test::call_service(&app, req).await,
        "INVALID_POST",
        StatusCode::BAD_REQUEST,
        Some("Deadline"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/addPosts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"postTitle\": ")
        .to_request();
    assert_problem_details_from_service_response(
        test::call_service(&app, req).await,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;

    // Nothing was stored
    let req = test::TestRequest::get().uri("/addPosts").to_request();
    assert_eq!(read_json(test::call_service(&app, req).await).await, json!([]));
    Ok(())
}

#[actix_web::test]
async fn test_oversized_body_is_413() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(memory_state().await)
        .with_prod_routes()
        .build()
        .await?;

    let mut body = post_body("Huge", "org@example.org", "2025-05-01");
    body["blob"] = json!("x".repeat(200 * 1024));

    let req = test::TestRequest::post()
        .uri("/addPosts")
        .set_json(body)
        .to_request();
    assert_problem_details_from_service_response(
        test::call_service(&app, req).await,
        "PAYLOAD_TOO_LARGE",
        StatusCode::PAYLOAD_TOO_LARGE,
        None,
    )
    .await;

    let req = test::TestRequest::get().uri("/addPosts").to_request();
    assert_eq!(read_json(test::call_service(&app, req).await).await, json!([]));
    Ok(())
}
