//! Cached one-shot strategic insights, one per service.
//!
//! Triggering an insight while one is already in flight or cached is a
//! no-op; a failed one may be retried. Resetting the store voids any call
//! still in flight.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::genai::{GenerationOptions, GenerationRequest, TextGenerator};

/// Fast model used for insight calls.
pub const INSIGHT_MODEL: &str = "gemini-3-flash-preview";

/// Shown when the service answers without any text.
pub const EMPTY_INSIGHT_FALLBACK: &str = "Insight unavailable at this time.";

/// Stored as the insight when the call fails outright.
pub const ERROR_INSIGHT_FALLBACK: &str = "Performance optimization requires deeper analysis.";

/// Lifecycle of one service's insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum InsightState {
    Unrequested,
    Pending,
    Ready(String),
    Failed(String),
}

fn insight_prompt(title: &str, full_description: &str) -> String {
    format!(
        "You are a visionary technical director. Analyze this service: \"{}\" - {}. \
         Provide a short, ultra-compelling strategic insight (30 words max) on why this \
         service is critical for market dominance in the next 24 months.",
        title, full_description
    )
}

/// Per-service insight store.
pub struct InsightGenerator {
    generator: Arc<dyn TextGenerator>,
    inner: Mutex<Inner>,
}

struct Inner {
    entries: HashMap<String, InsightState>,
    epoch: u64,
}

impl InsightGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                epoch: 0,
            }),
        }
    }

    /// Current state for a service id. Ids never requested read as
    /// [`InsightState::Unrequested`].
    pub async fn status(&self, service_id: &str) -> InsightState {
        self.inner
            .lock()
            .await
            .entries
            .get(service_id)
            .cloned()
            .unwrap_or(InsightState::Unrequested)
    }

    /// Requests an insight for a service and returns the state once settled.
    /// An in-flight or cached entry is returned as-is without a second call;
    /// the Pending entry itself is the latch that coalesces duplicates.
    pub async fn request(
        &self,
        service_id: &str,
        title: &str,
        full_description: &str,
    ) -> InsightState {
        let epoch = {
            let mut inner = self.inner.lock().await;
            match inner.entries.get(service_id) {
                Some(InsightState::Pending) => {
                    debug!(service_id, "insight already in flight");
                    return InsightState::Pending;
                }
                Some(InsightState::Ready(text)) => {
                    debug!(service_id, "insight served from cache");
                    return InsightState::Ready(text.clone());
                }
                _ => {}
            }
            inner
                .entries
                .insert(service_id.to_string(), InsightState::Pending);
            inner.epoch
        };

        let request = GenerationRequest {
            system_instruction: None,
            history: Vec::new(),
            new_input: insight_prompt(title, full_description),
            options: GenerationOptions {
                model: INSIGHT_MODEL.to_string(),
                thinking_budget: None,
            },
            empty_fallback: EMPTY_INSIGHT_FALLBACK.to_string(),
        };

        let outcome = self.generator.generate(&request).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            // The store was reset while the call was in flight.
            return InsightState::Unrequested;
        }
        let state = match outcome {
            Ok(text) => InsightState::Ready(text),
            Err(error) => {
                warn!(service_id, %error, "insight generation failed");
                InsightState::Failed(ERROR_INSIGHT_FALLBACK.to_string())
            }
        };
        inner.entries.insert(service_id.to_string(), state.clone());
        state
    }

    /// Drops every cached entry and voids any call still in flight.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
        inner.epoch = inner.epoch.wrapping_add(1);
    }
}
