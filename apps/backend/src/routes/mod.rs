use actix_web::web;

pub mod games;
pub mod health;

/// Configure application routes.
///
/// `main.rs` wires these into the HttpServer; tests register the same paths
/// directly so endpoint behavior can be exercised without a listener.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check route: /health
    cfg.configure(health::configure_routes);

    // Game routes: /api/game/**
    cfg.service(web::scope("/api/game").configure(games::configure_routes));
}
