// The session guard rejects requests before any handler or store call.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test;
use backend::auth::cookie::SESSION_COOKIE_NAME;
use backend::state::security_config::SecurityConfig;
use backend_test_support::problem_details::assert_problem_details_from_service_response;

use crate::support::auth::{mint_expired_token, mint_test_token, session_for};
use crate::support::create_test_app;
use crate::support::recording_store::RecordingStore;
use crate::support::test_state::{state_with_store, test_security};

const OWNER_ROUTES: [&str; 2] = [
    "/addPosts-email/ada@example.org",
    "/beVolunteer-email/ada@example.org",
];

#[actix_web::test]
async fn test_missing_cookie_is_401_and_store_untouched() -> Result<(), Box<dyn std::error::Error>>
{
    let store = Arc::new(RecordingStore::new());
    let app = create_test_app(state_with_store(store.clone()).await)
        .with_prod_routes()
        .build()
        .await?;

    for uri in OWNER_ROUTES {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "UNAUTHORIZED_MISSING_SESSION",
            StatusCode::UNAUTHORIZED,
            None,
        )
        .await;
    }

    assert_eq!(store.calls(), 0);
    Ok(())
}

#[actix_web::test]
async fn test_garbage_token_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(RecordingStore::new());
    let app = create_test_app(state_with_store(store.clone()).await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri(OWNER_ROUTES[0])
        .cookie(Cookie::new(SESSION_COOKIE_NAME, "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    assert_eq!(store.calls(), 0);
    Ok(())
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(state_with_store(Arc::new(RecordingStore::new())).await)
        .with_prod_routes()
        .build()
        .await?;

    let foreign = SecurityConfig::new(b"some-other-secret".to_vec());
    let req = test::TestRequest::get()
        .uri(OWNER_ROUTES[1])
        .cookie(Cookie::new(
            SESSION_COOKIE_NAME,
            mint_test_token("ada@example.org", &foreign),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_expired_token_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(RecordingStore::new());
    let app = create_test_app(state_with_store(store.clone()).await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri(OWNER_ROUTES[0])
        .cookie(Cookie::new(
            SESSION_COOKIE_NAME,
            mint_expired_token("ada@example.org", &test_security()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_EXPIRED_JWT",
        StatusCode::UNAUTHORIZED,
        Some("expired"),
    )
    .await;
    assert_eq!(store.calls(), 0);
    Ok(())
}

#[actix_web::test]
async fn test_valid_session_reaches_store() -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(RecordingStore::new());
    let app = create_test_app(state_with_store(store.clone()).await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri(OWNER_ROUTES[0])
        .cookie(session_for("ada@example.org", &test_security()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(store.calls(), 1);
    Ok(())
}

#[actix_web::test]
async fn test_public_routes_need_no_session() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(state_with_store(Arc::new(RecordingStore::new())).await)
        .with_prod_routes()
        .build()
        .await?;

    for uri in ["/", "/services", "/addPosts", "/search?search=x"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    }
    Ok(())
}
