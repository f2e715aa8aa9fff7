// src/services/mod.rs
pub mod query_service;
pub mod registration_service;
pub mod status_service;
