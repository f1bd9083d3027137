//! HTTP API for the folio portfolio backend.
//!
//! Routes:
//! - `GET /` — service banner
//! - `GET|HEAD /api/health` — keep-alive ping
//! - `GET /api/haiku` — cached or freshly generated haiku
//! - `POST /api/contact` — contact form relay
//! - `POST /api/chat` — Pai, the chat assistant
//!
//! Built on Axum. Error bodies are `{"detail": "..."}`.

pub mod api;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use folio_agent::prompts::OWNER_FRAGMENTS;
use folio_agent::{
    ActivitySource, Assistant, ContextAssembler, DocumentStore, GithubActivity, NoActivity,
    PoemCache, PoemGenerator, PoemService,
};
use folio_config::{AppConfig, CorsConfig};
use folio_core::ModelGateway;
use folio_mail::ContactRelay;
use folio_providers::{FallbackInvoker, OpenRouterClient};

/// Request body limit.
const BODY_LIMIT: usize = 1024 * 1024;

/// Shared application state for the gateway.
pub struct AppState {
    pub poems: PoemService,
    pub assistant: Assistant,
    pub contact: ContactRelay,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the services around one model gateway and one context assembler.
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        assembler: ContextAssembler,
        cache_ttl: Duration,
        contact: ContactRelay,
    ) -> Self {
        let invoker = FallbackInvoker::new(gateway);
        let cache = Arc::new(PoemCache::new(cache_ttl));
        let generator = PoemGenerator::new(invoker.clone(), assembler.clone());

        Self {
            poems: PoemService::new(cache, generator),
            assistant: Assistant::new(invoker, assembler),
            contact,
        }
    }

    /// Production wiring: OpenRouter, GitHub activity, SMTP.
    pub fn from_config(
        config: &AppConfig,
        data_dir: impl Into<PathBuf>,
    ) -> Result<Self, folio_mail::MailError> {
        let gateway = Arc::new(OpenRouterClient::new(config.openrouter_api_key.clone()));

        let activity: Arc<dyn ActivitySource> =
            match GithubActivity::from_config(&config.github, OWNER_FRAGMENTS) {
                Some(github) => Arc::new(github),
                None => {
                    info!("GITHUB_USERNAME not set, activity context disabled");
                    Arc::new(NoActivity)
                }
            };
        let assembler = ContextAssembler::new(DocumentStore::new(data_dir), activity);
        let contact = ContactRelay::from_config(&config.smtp)?;

        Ok(Self::new(gateway, assembler, config.haiku_cache_ttl(), contact))
    }
}

/// CORS policy from configuration.
///
/// `*` mirrors the caller's origin so credentials stay allowed; an explicit
/// list allows only those origins.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Skipping unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the Axum router with all routes.
pub fn build_router(state: SharedState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(api::root_handler))
        .route("/api/health", get(api::health_handler))
        .route("/api/haiku", get(api::haiku_handler))
        .route("/api/contact", post(api::contact_handler))
        .route("/api/chat", post(api::chat_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until interrupted.
pub async fn start(
    config: AppConfig,
    addr: SocketAddr,
    data_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(&config, &data_dir)?);
    let app = build_router(state, &config.cors);

    info!(
        addr = %addr,
        data_dir = %data_dir.display(),
        ai = config.has_api_key(),
        smtp = config.smtp.is_configured(),
        "Gateway starting"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
