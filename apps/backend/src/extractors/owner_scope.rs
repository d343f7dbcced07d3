use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use super::session_user::SessionUser;
use crate::auth::ownership::ensure_owner;
use crate::error::AppError;

/// Name of the path segment holding the owner email.
pub const OWNER_PATH_PARAM: &str = "email";

/// Access to the records of the owner named in the `{email}` path segment.
///
/// Extraction succeeds only when the session identity is that owner, so a
/// handler taking `OwnerScope` never touches the store for anyone else.
#[derive(Debug, Clone)]
pub struct OwnerScope {
    pub owner_email: String,
}

impl OwnerScope {
    pub fn email(&self) -> &str {
        &self.owner_email
    }
}

fn resolve(req: &HttpRequest) -> Result<OwnerScope, AppError> {
    let user = SessionUser::extract(req).into_inner()?;

    let owner_email = req
        .match_info()
        .get(OWNER_PATH_PARAM)
        .ok_or_else(|| AppError::internal("route has no {email} segment"))?
        .to_string();

    ensure_owner(&user.0, &owner_email)?;

    Ok(OwnerScope { owner_email })
}

impl FromRequest for OwnerScope {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}
