// src/services/status_service.rs

use crate::models::{MemberUpdate, ServiceError};
use crate::utils::storage::Storage;
use log::info;

// Apply a batch of full-replace status updates and stamp every team it touches.
// The batch is atomic: an unknown member aborts it with nothing written.
pub fn update_members(storage: &Storage, updates: &[MemberUpdate]) -> Result<Vec<String>, ServiceError> {
    if updates.is_empty() {
        return Err(ServiceError::Validation("No member updates provided".to_string()));
    }

    let touched = storage.apply_member_updates(updates)?;

    info!("✅ Updated {} members across teams {:?}", updates.len(), touched);
    Ok(touched)
}
