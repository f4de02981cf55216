use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::ServiceError;
use crate::upstream::NumberClient;
use crate::window::WindowManager;

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    window: Arc<WindowManager>,
    client: NumberClient,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>, window: Arc<WindowManager>, client: NumberClient) -> Self {
        Self {
            config,
            window,
            client,
        }
    }
}

pub struct ApiServer {
    config: Arc<ServerConfig>,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let config = Arc::new(config);
        let window = Arc::new(WindowManager::new(config.window.capacity));
        let client = NumberClient::new(&config.upstream)?;
        let state = AppState::new(Arc::clone(&config), window, client);

        Ok(Self { config, state })
    }

    pub async fn run(&self) -> Result<()> {
        let app = router(self.state.clone());

        let listener =
            tokio::net::TcpListener::bind(format!("0.0.0.0:{}", self.config.port)).await?;
        info!(
            "Average calculator listening on http://0.0.0.0:{}",
            self.config.port
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the service router. Exposed separately from [`ApiServer`] so tests
/// can drive the handlers without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/numbers/:numberid", get(get_numbers))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_numbers(
    Path(numberid): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ServiceError> {
    let resource = state
        .config
        .upstream
        .resources
        .get(&numberid)
        .ok_or_else(|| ServiceError::InvalidCategory {
            code: numberid.clone(),
        })?;

    // The fetch happens before any lock is taken; the window is only
    // touched once the batch is fully in hand.
    let outcome = match state.client.fetch_numbers(resource).await {
        Ok(batch) => state.window.ingest(&batch),
        Err(err) => {
            // Deliberate fallback: upstream trouble degrades to a no-op
            // read of the current window, reported as success.
            warn!(category = %numberid, error = %err, "upstream fetch failed, returning current window");
            state.window.fallback_outcome()
        }
    };

    Ok(Json(outcome).into_response())
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": "avg-window-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "window": {
            "length": state.window.len(),
            "capacity": state.config.window.capacity,
            "avg": state.window.average(),
        }
    }))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::InvalidCategory { ref code } => {
                warn!(code = %code, "rejected unknown category code");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            // Upstream errors are absorbed by the handler; reaching this arm
            // means a handler leaked one, so answer as a server fault.
            ServiceError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response(),
        }
    }
}
