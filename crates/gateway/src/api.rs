//! Request handlers, DTOs, and error mapping.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use folio_agent::AssistantError;
use folio_core::{ChatExchange, PoemArtifact};
use folio_mail::{ContactSubmission, MailError};

use crate::SharedState;

/// Service name reported by `GET /`.
pub const SERVICE_NAME: &str = "pk-portfolio-backend";

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RootResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HaikuQuery {
    #[serde(default, deserialize_with = "deserialize_flag")]
    refresh: bool,
}

#[derive(Serialize)]
pub struct HaikuResponse {
    haikus: Vec<PoemArtifact>,
    cached: bool,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<bool>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default)]
    history: Vec<ChatExchange>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    reply: String,
    model: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    detail: String,
}

/// Accept the usual spellings of a boolean query flag.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid boolean flag '{other}'"))),
    }
}

fn timestamp(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Failures surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("AI service not configured")]
    AiNotConfigured,

    #[error(
        "Pai is having trouble connecting. All models are currently unavailable — try again shortly."
    )]
    ChatUnavailable,

    #[error("Failed to send message. Please try again.")]
    MailFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AiNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ChatUnavailable | ApiError::MailFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<AssistantError> for ApiError {
    fn from(e: AssistantError) -> Self {
        match e {
            AssistantError::NotConfigured => ApiError::AiNotConfigured,
            AssistantError::Unavailable(_) => ApiError::ChatUnavailable,
        }
    }
}

impl From<MailError> for ApiError {
    fn from(_: MailError) -> Self {
        ApiError::MailFailed
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive",
        timestamp: timestamp(Utc::now()),
    })
}

pub async fn haiku_handler(
    State(state): State<SharedState>,
    Query(query): Query<HaikuQuery>,
) -> Json<HaikuResponse> {
    let batch = state.poems.serve(query.refresh).await;

    Json(HaikuResponse {
        cached: batch.is_cached(),
        fallback: batch.is_fallback().then_some(true),
        generated_at: timestamp(batch.generated_at),
        haikus: batch.haikus,
    })
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!(history = payload.history.len(), "Chat request");

    let reply = state.assistant.reply(&payload.message, &payload.history).await?;
    Ok(Json(ChatResponse {
        reply: reply.reply,
        model: reply.model,
    }))
}

pub async fn contact_handler(
    State(state): State<SharedState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<ContactResponse>, ApiError> {
    let outcome = state.contact.relay(&submission).await?;
    Ok(Json(ContactResponse {
        success: true,
        message: outcome.message(),
    }))
}
