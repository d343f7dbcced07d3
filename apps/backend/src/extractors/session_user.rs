use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::IdentityClaim;
use crate::error::AppError;

/// The verified identity of the caller.
///
/// Populated by `SessionGuard`; on a route the guard does not wrap this
/// extractor fails with 401 rather than reading the cookie itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser(pub IdentityClaim);

impl SessionUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<IdentityClaim>()
                .cloned()
                .map(SessionUser)
                .ok_or_else(AppError::unauthorized_missing_session),
        )
    }
}
