use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Member;

// Team row as stored in the `teams` table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub team_id: String,
    pub team_name: String,
    pub members: String, // JSON-encoded list of member names
    pub last_updated: NaiveDateTime,
}

impl Team {
    #[cfg(test)]
    pub fn member_names(&self) -> Vec<String> {
        serde_json::from_str(&self.members).expect("member snapshot is a JSON string list")
    }
}

// A team together with its member rows
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamView {
    pub team: Team,
    pub members: Vec<Member>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub team_id: String,
    pub qr: String, // base64 PNG
}

// What gets encoded into the registration QR code
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QrPayload {
    pub team_id: String,
    pub team_name: String,
    pub members: Vec<String>,
}
