use crate::models::{ServiceError, UpdateMembersRequest};
use crate::services::{query_service, status_service};
use crate::utils::storage::Storage;
use actix_web::{get, post, web, HttpResponse};
use log::{error, info};
use serde_json::json;

// Fetch a team and its members (dashboard scan)
#[get("/team/{team_id}")]
async fn get_team(storage: web::Data<Storage>, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();

    info!("🔍 Fetching team: {}", team_id);

    let view = query_service::get_team_view(&storage, &team_id).map_err(|e| {
        error!("❌ Team lookup failed for {}: {}", team_id, e);
        e
    })?;

    info!("✅ Found team: {} with {} members", team_id, view.members.len());

    Ok(HttpResponse::Ok().json(view))
}

// Apply check-in / snack / dinner / check-out flags for a batch of members
#[post("/update_members")]
async fn update_members(
    storage: web::Data<Storage>,
    body: web::Json<UpdateMembersRequest>,
) -> Result<HttpResponse, ServiceError> {
    info!("🔄 Updating {} members", body.members.len());

    status_service::update_members(&storage, &body.members).map_err(|e| {
        error!("❌ Member update batch of {} rejected: {}", body.members.len(), e);
        e
    })?;

    Ok(HttpResponse::Ok().json(json!({ "status": "updated" })))
}

// Admin data as JSON, most recently updated team first
#[get("/admin/teams")]
async fn list_teams(storage: web::Data<Storage>) -> Result<HttpResponse, ServiceError> {
    let teams = query_service::get_admin_view(&storage)?;

    info!("📋 Listing {} teams", teams.len());

    Ok(HttpResponse::Ok().json(teams))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_team)
        .service(update_members)
        .service(list_teams);
}
