//! Conversation state for one chat widget instance.
//!
//! The session is a plain state machine: every transition is synchronous and
//! the owner performs the network call between [`Session::begin_turn`] and
//! [`Session::complete_turn`]. Outcomes that arrive after the session was
//! torn down carry a stale epoch and are dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assistant::persona;
use crate::genai::{GenerationError, GenerationOptions, GenerationRequest, Role, Turn};

/// Replayed history is capped to this many trailing messages. The transcript
/// itself is never truncated.
pub const REPLAY_WINDOW: usize = 32;

/// One transcript entry. Appended only, never edited.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejection {
    Closed,
    EmptyInput,
    AwaitingResponse,
}

/// An accepted turn: the request to send, plus the epoch that must still be
/// current when the outcome lands.
#[derive(Debug)]
pub struct PendingTurn {
    pub request: GenerationRequest,
    pub epoch: u64,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub messages: Vec<ChatMessage>,
    pub is_open: bool,
    pub is_loading: bool,
    pub draft: String,
}

#[derive(Debug)]
pub struct Session {
    messages: Vec<ChatMessage>,
    is_open: bool,
    is_loading: bool,
    draft: String,
    epoch: u64,
}

impl Session {
    /// Starts closed, with the greeting already in the transcript.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::Assistant, persona::GREETING)],
            is_open: false,
            is_loading: false,
            draft: String::new(),
            epoch: 0,
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hides the widget. History and draft survive for the next `open`.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Accepts the current draft as a user turn.
    ///
    /// On success the trimmed input joins the transcript as a user message
    /// and the session enters its loading state; the caller sends the
    /// returned request. Rejections leave the transcript untouched.
    pub fn begin_turn(&mut self) -> Result<PendingTurn, TurnRejection> {
        if !self.is_open {
            return Err(TurnRejection::Closed);
        }
        if self.is_loading {
            return Err(TurnRejection::AwaitingResponse);
        }
        let input = self.draft.trim().to_string();
        if input.is_empty() {
            return Err(TurnRejection::EmptyInput);
        }

        // History replays everything before this turn, greeting included,
        // bounded by the replay window.
        let start = self.messages.len().saturating_sub(REPLAY_WINDOW);
        let history: Vec<Turn> = self.messages[start..]
            .iter()
            .map(|m| Turn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect();

        self.messages.push(ChatMessage::new(Role::User, input.clone()));
        self.draft.clear();
        self.is_loading = true;

        Ok(PendingTurn {
            request: GenerationRequest {
                system_instruction: Some(persona::SYSTEM_INSTRUCTION.to_string()),
                history,
                new_input: input,
                options: GenerationOptions {
                    model: persona::CHAT_MODEL.to_string(),
                    thinking_budget: Some(persona::THINKING_BUDGET),
                },
                empty_fallback: persona::EMPTY_REPLY_FALLBACK.to_string(),
            },
            epoch: self.epoch,
        })
    }

    /// Lands the outcome of a turn. Success appends the reply, failure
    /// appends the fixed connection apology; either way the session returns
    /// to idle. Outcomes from a bumped epoch belong to a torn-down session
    /// and are dropped whole.
    pub fn complete_turn(&mut self, epoch: u64, outcome: Result<String, GenerationError>) {
        if epoch != self.epoch {
            return;
        }
        let text = match outcome {
            Ok(text) => text,
            Err(_) => persona::ERROR_FALLBACK.to_string(),
        };
        self.messages.push(ChatMessage::new(Role::Assistant, text));
        self.is_loading = false;
    }

    /// Tears the session down: bumps the epoch so any in-flight outcome is
    /// voided.
    pub fn end(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.is_loading = false;
        self.is_open = false;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            is_open: self.is_open,
            is_loading: self.is_loading,
            draft: self.draft.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
