//! Session helpers for tests

use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use backend::auth::claims::IdentityClaim;
use backend::auth::cookie::session_cookie;
use backend::auth::jwt::mint_session_token;
use backend::state::security_config::SecurityConfig;

pub fn mint_test_token(email: &str, sec: &SecurityConfig) -> String {
    mint_session_token(&IdentityClaim::new(email), SystemTime::now(), sec)
        .expect("should mint token successfully")
}

/// A `token` cookie carrying a valid session for `email`
pub fn session_for(email: &str, sec: &SecurityConfig) -> Cookie<'static> {
    session_cookie(&mint_test_token(email, sec), sec)
}

/// A token minted eight days ago, past its seven-day lifetime
pub fn mint_expired_token(email: &str, sec: &SecurityConfig) -> String {
    let issued = SystemTime::now()
        .checked_sub(Duration::from_secs(8 * 24 * 60 * 60))
        .unwrap();
    mint_session_token(&IdentityClaim::new(email), issued, sec)
        .expect("should mint expired token successfully")
}
