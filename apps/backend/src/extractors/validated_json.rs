use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpRequest};
use futures_util::StreamExt;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::models::Validate;
use crate::trace_ctx;

/// Default cap on JSON request bodies.
pub const DEFAULT_JSON_LIMIT: usize = 100 * 1024;

/// Maximum JSON body size in bytes, registered as app data. Requests without
/// it fall back to [`DEFAULT_JSON_LIMIT`].
#[derive(Debug, Clone, Copy)]
pub struct JsonBodyLimit(pub usize);

impl Default for JsonBodyLimit {
    fn default() -> Self {
        Self(DEFAULT_JSON_LIMIT)
    }
}

/// JSON body extractor that parses the lenient wire shape of `T` and then
/// runs `T::validate`. Parse failures and validation failures both surface as
/// 400 Problem Details.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let limit = req
            .app_data::<JsonBodyLimit>()
            .copied()
            .unwrap_or_default()
            .0;
        let declared_len = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());

        // Read before the future so nothing borrows `req` across an await
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            if declared_len.is_some_and(|len| len > limit) {
                debug!(trace_id = %trace_id, limit, "declared body length over limit");
                return Err(AppError::payload_too_large(limit));
            }

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request("BAD_REQUEST", "Failed to read request body")
                })?;
                if body.len() + chunk.len() > limit {
                    debug!(trace_id = %trace_id, limit, "body over limit");
                    return Err(AppError::payload_too_large(limit));
                }
                body.extend_from_slice(&chunk);
            }

            let raw = serde_json::from_slice::<T::Raw>(&body).map_err(|e| {
                debug!(
                    trace_id = %trace_id,
                    error = %Redacted(&e.to_string()),
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request("BAD_REQUEST", classify_json_error(&e))
            })?;

            let value = T::validate(raw).map_err(|e| {
                debug!(trace_id = %trace_id, code = e.code(), "payload rejected");
                e
            })?;

            Ok(ValidatedJson(value))
        })
    }
}

/// Classify serde_json::Error and return a sanitized error message
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
