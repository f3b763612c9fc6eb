//! Site services for White Wolf Studio: the content catalog, the strategist
//! chat assistant, and per-service AI insights, exposed over HTTP.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod genai;
pub mod insight;
pub mod server;

pub use config::Config;
pub use server::{create_router, AppState};
