use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::repos::{require_store, services};
use crate::state::app_state::AppState;

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = require_store(&app_state)?;
    Ok(HttpResponse::Ok().json(services::list_by_deadline(store).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/services", web::get().to(list));
}
