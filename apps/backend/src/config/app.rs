//! Process configuration read from the environment at startup.

use std::env;

use crate::error::AppError;
use crate::extractors::validated_json::DEFAULT_JSON_LIMIT;

/// Origins allowed to call the API with credentials when
/// `CORS_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "https://volunteerhub-cc355.web.app",
    "https://volunteerhub-cc355.firebaseapp.com",
];

/// Deployment environment; drives the session cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Production,
    Development,
}

impl RuntimeEnv {
    /// `APP_ENV=production` (case-insensitive) selects production, anything else development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.trim().eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Which document store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("STORE_BACKEND") {
            Err(_) => Ok(Self::Postgres),
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "postgres" => Ok(Self::Postgres),
                "memory" => Ok(Self::Memory),
                other => Err(AppError::config(format!(
                    "STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                ))),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub runtime_env: RuntimeEnv,
    pub store_backend: StoreBackend,
    /// Largest accepted JSON request body, in bytes.
    pub max_json_payload_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT must be a valid port number, got '{raw}'")))?,
            Err(_) => 5000,
        };

        let jwt_secret = env::var("ACCESS_TOKEN_SECRET").map_err(|_| {
            AppError::config("Required environment variable 'ACCESS_TOKEN_SECRET' is not set")
        })?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::config("ACCESS_TOKEN_SECRET must not be empty"));
        }

        let max_json_payload_size = env::var("MAX_JSON_PAYLOAD_SIZE")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_JSON_LIMIT);

        Ok(Self {
            host,
            port,
            jwt_secret,
            runtime_env: RuntimeEnv::from_env(),
            store_backend: StoreBackend::from_env()?,
            max_json_payload_size,
        })
    }
}

/// Parse a comma-separated origin list, keeping only http(s) origins.
/// Falls back to [`DEFAULT_ALLOWED_ORIGINS`] when nothing valid remains.
pub fn allowed_origins(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect();

    if parsed.is_empty() {
        DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        parsed
    }
}
