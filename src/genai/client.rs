//! HTTP client for the hosted generation service.

use reqwest::Client;
use tracing::{debug, warn};

use crate::genai::traits::TextGenerator;
use crate::genai::types::{GenerationError, GenerationRequest};
use crate::genai::wire::{GenerateContentBody, GenerateContentResponse};

/// Client for the `generateContent` endpoint. Built once at startup and
/// shared by every consumer. Makes exactly one POST per call with no retry;
/// timeouts are left to the transport.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        request.validate()?;

        let body = GenerateContentBody::from_request(request);
        let url = self.endpoint(&request.options.model);
        debug!(
            model = %request.options.model,
            history = request.history.len(),
            "sending generation request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), connect = e.is_connect(), "generation transport failure");
                GenerationError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable body".to_string());
            warn!(status = status.as_u16(), "generation request rejected");
            return Err(match status.as_u16() {
                401 | 403 => GenerationError::Auth {
                    status: status.as_u16(),
                },
                429 => GenerationError::Quota {
                    status: status.as_u16(),
                },
                _ => GenerationError::Service {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        // Read the raw body first so a non-JSON answer (a proxy error page,
        // for instance) maps to Malformed rather than a decode panic path.
        let raw = response.text().await.map_err(GenerationError::Transport)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "generation response was not valid JSON");
            GenerationError::Malformed {
                reason: e.to_string(),
            }
        })?;

        match parsed.text() {
            Some(text) => Ok(text),
            None => {
                debug!("generation succeeded without text, substituting the fallback line");
                Ok(request.empty_fallback.clone())
            }
        }
    }
}
