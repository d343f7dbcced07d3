use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::repos::require_store;
use crate::state::app_state::AppState;

pub const ROOT_BANNER: &str = "VOLUNTEER SERVER IS RUNNING";

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(ROOT_BANNER)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_backend: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    time: String,
}

/// Liveness plus a store round-trip. Always 200; the store state is reported
/// in the body so the process is not restarted for a database outage.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (store, store_backend, store_error) = match require_store(&app_state) {
        Ok(store) => match store.ping().await {
            Ok(()) => ("ok", Some(store.backend_name()), None),
            Err(e) => ("error", Some(store.backend_name()), Some(e.to_string())),
        },
        Err(_) => ("error", None, Some("store not configured".to_string())),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        store,
        store_backend,
        store_error,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
