//! Wire format for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use crate::genai::types::{GenerationRequest, Role};

/// The service names the assistant role `model` on the wire.
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<WireContent>,
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentBody {
    pub(super) fn from_request(request: &GenerationRequest) -> Self {
        let mut contents: Vec<WireContent> = request
            .history
            .iter()
            .map(|turn| WireContent::turn(turn.role, &turn.text))
            .collect();
        contents.push(WireContent::turn(Role::User, &request.new_input));

        Self {
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(WireContent::bare),
            contents,
            generation_config: request.options.thinking_budget.map(|budget| {
                GenerationConfig {
                    thinking_config: ThinkingConfig {
                        thinking_budget: budget,
                    },
                }
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

impl WireContent {
    fn turn(role: Role, text: &str) -> Self {
        Self {
            role: Some(wire_role(role).to_string()),
            parts: vec![WirePart {
                text: text.to_string(),
            }],
        }
    }

    /// The system instruction carries no role.
    fn bare(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![WirePart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct WirePart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfig {
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ThinkingConfig {
    pub thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Candidate {
    pub content: Option<WireContent>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate. A safety block surfaces as
    /// a candidate without content and reads as `None` here, the same as an
    /// absent or whitespace-only answer.
    pub(super) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
