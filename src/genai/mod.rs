//! Stateless pipeline for calling the external text-generation service.
//! Validates the request, makes exactly one call, and folds every failure
//! into [`GenerationError`]. All state lives with the callers.

pub mod client;
pub mod traits;
pub mod types;
mod wire;

pub use client::GeminiClient;
pub use traits::TextGenerator;
pub use types::{GenerationError, GenerationOptions, GenerationRequest, Role, Turn};
