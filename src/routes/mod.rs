// src/routes/mod.rs
pub mod page_routes;
pub mod registration_routes;
pub mod team_routes;

use crate::models::ServiceError;
use actix_web::web;
use log::warn;

// Malformed or mistyped JSON bodies become 400s with a readable message
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("⚠️ Rejected request body: {}", err);
        ServiceError::Validation(err.to_string()).into()
    })
}

// Register every route group
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(registration_routes::init_routes)
        .configure(team_routes::init_routes)
        .configure(page_routes::init_routes);
}
