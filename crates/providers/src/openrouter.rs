//! OpenRouter gateway client.
//!
//! OpenRouter exposes an OpenAI-compatible `/chat/completions` endpoint that
//! routes to many upstream vendors by model id. One `complete` call is one
//! HTTP request; there are no retries here.

use async_trait::async_trait;
use folio_core::error::ProviderError;
use folio_core::provider::{CompletionRequest, ModelGateway, ResponseFormat};
use serde::Deserialize;
use tracing::{debug, warn};

/// Default OpenRouter API root.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Attribution headers OpenRouter uses for app usage accounting.
pub const APP_REFERER: &str = "https://www.pkowadkar.com";
pub const APP_TITLE: &str = "pk-portfolio";

/// A client for the OpenRouter gateway.
pub struct OpenRouterClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenRouterClient {
    /// Create a client against the public OpenRouter endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(OPENROUTER_BASE_URL, api_key)
    }

    /// Create a client against another OpenAI-compatible root.
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: reqwest::Client::new(),
        }
    }

    /// Build the JSON request body.
    fn request_body(request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.params.temperature,
            "max_tokens": request.params.max_tokens,
        });

        if let Some(ResponseFormat::JsonObject) = request.params.response_format {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        body
    }

    /// Pull the assistant text out of a completion response body.
    fn extract_text(body: &str) -> Result<String, ProviderError> {
        let api_response: ApiResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::MalformedResponse(format!("Failed to parse response: {e}")))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("No message content in response".into()))?;

        if content.trim().is_empty() {
            return Err(ProviderError::MalformedResponse("Empty message content".into()));
        }

        Ok(content)
    }
}

#[async_trait]
impl ModelGateway for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("OPENROUTER_API_KEY not set".into()))?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::request_body(&request);

        debug!(model = %request.model, messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .timeout(request.params.timeout)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(&request.model, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(&request.model, e))?;

        if !status.is_success() {
            warn!(model = %request.model, status = status.as_u16(), "Gateway returned error");
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: text,
            });
        }

        Self::extract_text(&text)
    }
}

fn map_transport_error(model: &str, e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(format!("Model '{model}' timed out"))
    } else {
        ProviderError::Network(e.to_string())
    }
}

// --- OpenAI-compatible response types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
