//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::SessionSnapshot;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub service: Option<String>,
    pub brief: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
}
