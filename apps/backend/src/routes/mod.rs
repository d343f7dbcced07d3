use actix_web::web;

pub mod auth;
pub mod health;
pub mod posts;
pub mod services;
pub mod signups;

/// Register every route. Shared by `main.rs` and the integration tests, so
/// both serve the same table; the owner-scoped resources carry their own
/// `SessionGuard`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(services::configure_routes)
        .configure(posts::configure_routes)
        .configure(signups::configure_routes);
}
