//! The strategist chat: persona, per-session conversation state, and the
//! driver that runs turns against the generation boundary.

pub mod persona;
pub mod service;
pub mod session;

pub use service::AssistantService;
pub use session::{ChatMessage, Session, SessionSnapshot, TurnRejection, REPLAY_WINDOW};
