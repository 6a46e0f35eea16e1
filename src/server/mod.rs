//! # HTTP Service
//!
//! Dialogue lifecycle over JSON, powered by axum.
//!
//! Serves (each also under `/api`):
//! - `POST /start`               create a dialogue session
//! - `POST /next`                run the next turn of a session
//! - `POST /reset`               discard a session
//! - `GET  /history/{session_id}` full shared transcript
//! - `GET  /health`              liveness and session count
//! - `GET  /`                    front-end page
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::core::Config;
use crate::features::{BackendFactory, OpenAiBackendFactory, SessionStore};

/// Shared state for the HTTP service.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub config: Arc<Config>,
    pub backends: Arc<dyn BackendFactory>,
}

impl AppState {
    pub fn new(config: Config, backends: Arc<dyn BackendFactory>) -> Self {
        Self {
            sessions: SessionStore::new(),
            config: Arc::new(config),
            backends,
        }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(handlers::start))
        .route("/next", post(handlers::next))
        .route("/reset", post(handlers::reset))
        .route("/history/{session_id}", get(handlers::history))
        .route("/health", get(handlers::health))
}

/// Build the axum router.
pub fn build_router(state: AppState) -> Router {
    let cors = if state.config.cors_allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<_> = state
            .config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    Router::new()
        .route("/", get(handlers::index))
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!(
        "Model A: {} (URL: {})",
        config.participant_a.model, config.participant_a.base_url
    );
    info!(
        "Model B: {} (URL: {})",
        config.participant_b.model, config.participant_b.base_url
    );

    let state = AppState::new(config, Arc::new(OpenAiBackendFactory));
    let app = build_router(state);

    info!("llm-talks listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
