//! Volunteer-opportunity posts (`addPosts`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{is_email_shaped, required, Deadline, Validate};
use crate::error::AppError;
use crate::store::ID_FIELD;

const CODE: &str = "INVALID_POST";

/// Field names as they appear on the wire and in storage.
pub const TITLE_FIELD: &str = "postTitle";
pub const ORGANIZER_FIELD: &str = "organizerEmail";
pub const DEADLINE_FIELD: &str = "Deadline";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "postTitle")]
    pub post_title: String,
    #[serde(rename = "organizerEmail")]
    pub organizer_email: String,
    #[serde(rename = "Deadline")]
    pub deadline: Deadline,
    /// Everything else the client sent (location, category, needed
    /// volunteers...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lenient wire shape; every checked field is optional so missing ones get a
/// precise message instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct PostInput {
    #[serde(rename = "postTitle", default)]
    pub post_title: Option<String>,
    #[serde(rename = "organizerEmail", default)]
    pub organizer_email: Option<String>,
    #[serde(rename = "Deadline", default)]
    pub deadline: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Post {
    type Raw = PostInput;

    fn validate(raw: PostInput) -> Result<Self, AppError> {
        let post_title = required(raw.post_title, TITLE_FIELD, CODE)?;

        let organizer_email = required(raw.organizer_email, ORGANIZER_FIELD, CODE)?;
        if !is_email_shaped(&organizer_email) {
            return Err(AppError::invalid(
                CODE,
                format!("{ORGANIZER_FIELD} must be an email address"),
            ));
        }

        let deadline = required(raw.deadline, DEADLINE_FIELD, CODE)?;
        let deadline =
            Deadline::parse(&deadline).map_err(|e| AppError::invalid(CODE, e.to_string()))?;

        let mut extra = raw.extra;
        extra.remove(ID_FIELD);

        Ok(Self {
            post_title,
            organizer_email,
            deadline,
            extra,
        })
    }
}
