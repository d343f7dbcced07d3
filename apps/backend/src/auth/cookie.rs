//! Session cookie handling.
//!
//! The session token travels in an HttpOnly cookie. Production deployments
//! serve a frontend from another site, so the cookie must be `Secure` with
//! `SameSite=None`; everywhere else it is `SameSite=Strict` over plain HTTP.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

use crate::state::security_config::SecurityConfig;

/// Cookie name for the session token
pub const SESSION_COOKIE_NAME: &str = "token";

fn attributes(security: &SecurityConfig) -> (bool, SameSite) {
    if security.is_production() {
        (true, SameSite::None)
    } else {
        (false, SameSite::Strict)
    }
}

/// Build the cookie carrying a freshly minted session token.
///
/// No `Max-Age` is set; the browser keeps it for the session and the token's
/// own expiry bounds its validity.
pub fn session_cookie(token: &str, security: &SecurityConfig) -> Cookie<'static> {
    let (secure, same_site) = attributes(security);

    Cookie::build(SESSION_COOKIE_NAME, token.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .finish()
}

/// Build a cookie that makes the browser discard the session cookie immediately.
pub fn removal_cookie(security: &SecurityConfig) -> Cookie<'static> {
    let (secure, same_site) = attributes(security);

    Cookie::build(SESSION_COOKIE_NAME, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .max_age(Duration::ZERO)
        .finish()
}

/// Read the session token from the request, if any. Empty values count as absent.
pub fn extract_session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|value| !value.is_empty())
}
