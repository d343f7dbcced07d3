use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::extractors::{OwnerScope, ValidatedJson};
use crate::logging::pii::Redacted;
use crate::middleware::SessionGuard;
use crate::models::Post;
use crate::repos::{posts, require_store};
use crate::state::app_state::AppState;
use crate::store::{DocumentId, Lookup};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

async fn create(
    body: ValidatedJson<Post>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    let outcome = posts::create(store, &body).await?;
    info!(id = %outcome.inserted_id, "post created");
    Ok(HttpResponse::Ok().json(outcome))
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    Ok(HttpResponse::Ok().json(posts::list_by_deadline(store).await?))
}

async fn search(
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    let needle = query.search.as_deref().unwrap_or("");
    Ok(HttpResponse::Ok().json(posts::search_by_title(store, needle).await?))
}

async fn get_one(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path)?;
    let store = require_store(&app_state)?;

    match posts::find(store, id).await? {
        Lookup::Found(record) => Ok(HttpResponse::Ok().json(record)),
        Lookup::NotFound => Err(AppError::not_found(
            "POST_NOT_FOUND",
            format!("Post {id} not found"),
        )),
    }
}

async fn by_organizer(
    scope: OwnerScope,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    let records = posts::list_by_organizer(store, scope.email()).await?;
    debug!(organizer = %Redacted(scope.email()), count = records.len(), "organizer posts");
    Ok(HttpResponse::Ok().json(records))
}

async fn replace(
    path: web::Path<String>,
    body: ValidatedJson<Post>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path)?;
    let store = require_store(&app_state)?;
    let outcome = posts::replace(store, id, &body).await?;
    info!(%id, upserted = outcome.upserted_count == 1, "post replaced");
    Ok(HttpResponse::Ok().json(outcome))
}

async fn delete(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path)?;
    let store = require_store(&app_state)?;
    let outcome = posts::delete(store, id).await?;
    info!(%id, deleted = outcome.deleted_count, "post delete");
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/addPosts")
            .route(web::post().to(create))
            .route(web::get().to(list)),
    )
    .route("/search", web::get().to(search))
    .service(
        web::resource("/addPosts/{id}")
            .route(web::get().to(get_one))
            .route(web::put().to(replace))
            .route(web::delete().to(delete)),
    )
    .service(
        web::resource("/addPosts-email/{email}")
            .wrap(SessionGuard)
            .route(web::get().to(by_organizer)),
    );
}
