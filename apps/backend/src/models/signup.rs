//! Volunteer signups (`beVolunteer`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{is_email_shaped, required, Validate};
use crate::error::AppError;
use crate::store::ID_FIELD;

const CODE: &str = "INVALID_SIGNUP";

pub const VOLUNTEER_FIELD: &str = "volunteerEmail";

/// A volunteer's request to join a post. The opportunity details are copied
/// in by the client and kept verbatim; nothing links back to the post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signup {
    #[serde(rename = "volunteerEmail")]
    pub volunteer_email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct SignupInput {
    #[serde(rename = "volunteerEmail", default)]
    pub volunteer_email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Signup {
    type Raw = SignupInput;

    fn validate(raw: SignupInput) -> Result<Self, AppError> {
        let volunteer_email = required(raw.volunteer_email, VOLUNTEER_FIELD, CODE)?;
        if !is_email_shaped(&volunteer_email) {
            return Err(AppError::invalid(
                CODE,
                format!("{VOLUNTEER_FIELD} must be an email address"),
            ));
        }

        let mut extra = raw.extra;
        extra.remove(ID_FIELD);

        Ok(Self {
            volunteer_email,
            extra,
        })
    }
}
