//! Shared structs for the generation boundary.

use serde::Serialize;
use thiserror::Error;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn replayed to the model.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Model selection for one call.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    pub thinking_budget: Option<u32>,
}

/// A complete description of one generation call. Immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Persona framing. When present it must carry actual content.
    pub system_instruction: Option<String>,
    pub history: Vec<Turn>,
    pub new_input: String,
    pub options: GenerationOptions,
    /// Substituted as the reply when the service succeeds without text.
    pub empty_fallback: String,
}

impl GenerationRequest {
    /// Rejects blank input before any network traffic happens.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.new_input.trim().is_empty() {
            return Err(GenerationError::InvalidRequest {
                reason: "new_input is empty".to_string(),
            });
        }
        if let Some(instruction) = &self.system_instruction {
            if instruction.trim().is_empty() {
                return Err(GenerationError::InvalidRequest {
                    reason: "system_instruction is empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Why a generation call failed. Diagnostic only: consumers log it and show
/// a pre-authored fallback line, never this text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authentication failed ({status})")]
    Auth { status: u16 },
    #[error("rate limit exceeded ({status})")]
    Quota { status: u16 },
    #[error("service error ({status}): {body}")]
    Service { status: u16, body: String },
    #[error("malformed response: {reason}")]
    Malformed { reason: String },
}
