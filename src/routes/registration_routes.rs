use crate::models::{RegisterRequest, ServiceError};
use crate::services::registration_service;
use crate::utils::storage::Storage;
use actix_web::{post, web, HttpResponse};
use log::{error, info};

// Register a team and return its id with the QR code
#[post("/register")]
async fn register_team(
    storage: web::Data<Storage>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Registering team: {}", body.team_name.trim());

    let response = registration_service::register_team(&storage, &body).map_err(|e| {
        error!("❌ Registration failed: {}", e);
        e
    })?;

    info!("✅ Team registered: {}", response.team_id);

    Ok(HttpResponse::Ok().json(response))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register_team);
}
