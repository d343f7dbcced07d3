//! Identity carried inside the session token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::Validate;

/// JWT registered claims we manage ourselves; never taken from the client.
const RESERVED: [&str; 4] = ["iat", "exp", "nbf", "aud"];

/// The identity a client presents at login and gets back from every
/// verified request.
///
/// Only `email` is interpreted (for ownership checks); any other fields are
/// kept as supplied.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdentityClaim {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaim {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Drop client-supplied fields that collide with the token's own claims.
    pub fn without_reserved(mut self) -> Self {
        for key in RESERVED {
            self.extra.remove(key);
        }
        self
    }
}

/// Login bodies: `email` must be present and non-blank.
impl Validate for IdentityClaim {
    type Raw = IdentityClaim;

    fn validate(raw: IdentityClaim) -> Result<Self, AppError> {
        if raw.email.trim().is_empty() {
            return Err(AppError::invalid("INVALID_IDENTITY", "email is required"));
        }
        Ok(raw.without_reserved())
    }
}
