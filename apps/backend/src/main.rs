use actix_web::{web, App, HttpServer};
use backend::config::app::{allowed_origins, AppConfig};
use backend::config::db::DbProfile;
use backend::extractors::JsonBodyLimit;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let origins = allowed_origins(std::env::var("CORS_ALLOWED_ORIGINS").ok().as_deref());
    let security_config =
        SecurityConfig::new(config.jwt_secret.as_bytes()).with_runtime_env(config.runtime_env);

    let app_state = match build_state()
        .with_store_backend(config.store_backend, DbProfile::Prod)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        runtime_env = ?config.runtime_env,
        store = ?app_state.store().map(|s| s.backend_name()),
        origins = ?origins,
        max_json_payload_size = config.max_json_payload_size,
        "starting volunteer backend"
    );

    let data = web::Data::new(app_state);
    let json_limit = JsonBodyLimit(config.max_json_payload_size);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(json_limit)
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
