use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::claims::IdentityClaim;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims included in our session tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: IdentityClaim,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint a session token for `identity`, valid for `security.session_ttl` from `now`.
pub fn mint_session_token(
    identity: &IdentityClaim,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let exp = iat + security.session_ttl.as_secs() as i64;

    let claims = SessionClaims {
        identity: identity.clone().without_reserved(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a session token and return the identity it was minted for.
///
/// Errors:
/// - Expired token → `AppError::UnauthorizedExpiredJwt`
/// - Bad signature or any other decode failure → `AppError::UnauthorizedInvalidJwt`
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<IdentityClaim, AppError> {
    // Pin the algorithm; a token is valid only while now < exp, no grace period.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims.identity)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
