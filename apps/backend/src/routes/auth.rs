use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;

use crate::auth::claims::IdentityClaim;
use crate::auth::cookie::{removal_cookie, session_cookie};
use crate::auth::jwt::mint_session_token;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Issue a session for whatever identity the client presents. The token is
/// only ever sent back as an HttpOnly cookie.
async fn login(
    body: ValidatedJson<IdentityClaim>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let identity = body.into_inner();
    let token = mint_session_token(&identity, SystemTime::now(), &app_state.security)?;

    info!(email = %Redacted(&identity.email), "session issued");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token, &app_state.security))
        .json(SuccessResponse { success: true }))
}

/// Tell the browser to drop the session cookie. Tokens already issued stay
/// valid until they expire.
async fn logout(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&app_state.security))
        .json(SuccessResponse { success: true })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/jwt", web::post().to(login))
        .route("/logOut", web::post().to(logout));
}
