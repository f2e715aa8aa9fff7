// src/services/registration_service.rs

use crate::models::{QrPayload, RegisterRequest, RegisterResponse, ServiceError};
use crate::utils::qr;
use crate::utils::storage::Storage;
use log::info;

// Trim the team name and member names, dropping members that end up empty
pub fn normalize(request: &RegisterRequest) -> Result<(String, Vec<String>), ServiceError> {
    let team_name = request.team_name.trim().to_string();
    let members: Vec<String> = request
        .members
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    if team_name.is_empty() || members.is_empty() {
        return Err(ServiceError::Validation("Missing team name or members".to_string()));
    }

    Ok((team_name, members))
}

// Validate, build the QR image, then persist the team and its members.
// Nothing is written unless the QR code renders.
pub fn register_team(storage: &Storage, request: &RegisterRequest) -> Result<RegisterResponse, ServiceError> {
    let (team_name, members) = normalize(request)?;
    let team_id = Storage::new_team_id();

    let payload = QrPayload {
        team_id: team_id.clone(),
        team_name,
        members,
    };
    let qr = qr::render_payload(&payload)?;

    storage.insert_team_and_members(&team_id, &payload.team_name, &payload.members)?;

    info!(
        "✅ Stored team {} ({}) with {} members",
        payload.team_name,
        team_id,
        payload.members.len()
    );

    Ok(RegisterResponse { team_id, qr })
}
