// checkin-service/src/models/mod.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use log::error;
use serde_json::json;

pub mod team;
pub use team::*;

pub mod member;
pub use member::*;

// Custom error types
#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    // Bad or missing input
    #[display(fmt = "{}", _0)]
    Validation(String),
    // Referenced team or member is absent
    #[display(fmt = "{}", _0)]
    NotFound(String),
    // Backend failure, not otherwise distinguished
    #[display(fmt = "Storage error: {}", _0)]
    Storage(String),
}

impl ServiceError {
    pub fn team_not_found() -> Self {
        ServiceError::NotFound("Team not found".to_string())
    }

    pub fn member_not_found(member_id: i64) -> Self {
        ServiceError::NotFound(format!("Member not found: {}", member_id))
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal details stay in the log
        let message = match self {
            ServiceError::Storage(detail) => {
                error!("❌ Storage failure: {}", detail);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Storage(format!("JSON encoding failed: {}", err))
    }
}
