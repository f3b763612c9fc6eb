//! The generation seam.

use crate::genai::types::{GenerationError, GenerationRequest};

/// Anything that can answer a generation request. Production code calls the
/// hosted service; tests substitute scripted implementations.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
