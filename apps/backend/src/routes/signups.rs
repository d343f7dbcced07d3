use actix_web::{web, HttpResponse};
use tracing::{debug, info};

use crate::error::AppError;
use crate::extractors::{OwnerScope, ValidatedJson};
use crate::logging::pii::Redacted;
use crate::middleware::SessionGuard;
use crate::models::Signup;
use crate::repos::{require_store, signups};
use crate::state::app_state::AppState;
use crate::store::DocumentId;

async fn create(
    body: ValidatedJson<Signup>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    let outcome = signups::create(store, &body).await?;
    info!(id = %outcome.inserted_id, "signup created");
    Ok(HttpResponse::Ok().json(outcome))
}

async fn by_volunteer(
    scope: OwnerScope,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    let records = signups::list_by_volunteer(store, scope.email()).await?;
    debug!(volunteer = %Redacted(scope.email()), count = records.len(), "volunteer signups");
    Ok(HttpResponse::Ok().json(records))
}

async fn delete(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path)?;
    let store = require_store(&app_state)?;
    let outcome = signups::delete(store, id).await?;
    info!(%id, deleted = outcome.deleted_count, "signup delete");
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/beVolunteer", web::post().to(create))
        .route("/beVolunteer/{id}", web::delete().to(delete))
        .service(
            web::resource("/beVolunteer-email/{email}")
                .wrap(SessionGuard)
                .route(web::get().to(by_volunteer)),
        );
}
