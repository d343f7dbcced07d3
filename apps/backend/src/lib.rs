#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod repos;
pub mod routes;
pub mod state;
pub mod store;
pub mod trace_ctx;


// Re-exports for public API
pub use auth::claims::IdentityClaim;
pub use auth::jwt::{mint_session_token, verify_session_token, SessionClaims};
pub use config::db::{db_url, DbProfile};
pub use error::AppError;
pub use extractors::{OwnerScope, SessionUser, ValidatedJson};
pub use infra::db::{bootstrap_db, connect_db};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::session_guard::SessionGuard;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::{DocumentStore, MemoryStore, SeaStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
