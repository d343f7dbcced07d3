//! Typed views of the stored collections and the payload validation that
//! guards writes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::store::{Document, DocumentId, StoredDocument};

pub mod deadline;
pub mod post;
pub mod signup;

pub use deadline::{Deadline, DeadlineError};
pub use post::{Post, PostInput};
pub use signup::{Signup, SignupInput};

/// A payload that is deserialized in a lenient wire shape and then checked
/// into its typed form.
pub trait Validate: Sized {
    type Raw: DeserializeOwned;

    fn validate(raw: Self::Raw) -> Result<Self, AppError>;
}

/// A typed document with its id, rendered as `{"_id": ..., ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub data: T,
}

impl<T: DeserializeOwned> Record<T> {
    pub fn from_stored(doc: StoredDocument) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: doc.id,
            data: serde_json::from_value(Value::Object(doc.body))?,
        })
    }
}

/// Serialize a typed payload into the object stored for it.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(_) => Err(AppError::internal("payload did not serialize to an object")),
        Err(e) => Err(AppError::internal(format!("payload serialization failed: {e}"))),
    }
}

pub fn is_email_shaped(raw: &str) -> bool {
    lazy_regex::regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", raw)
}

/// Presence check shared by the payload validators.
pub(crate) fn required(
    value: Option<String>,
    field: &'static str,
    code: &'static str,
) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::invalid(code, format!("{field} is required"))),
    }
}
