//! REST API server for HireFlow.
//!
//! Provides HTTP endpoints for:
//! - The live call page admission check
//! - Voice assistant management (list, create, update)
//! - Webinar records and pipeline boards
//! - The Vapi call lifecycle webhook

pub mod error;
pub mod routes;

use crate::call::CallStore;
use crate::vapi::AssistantGateway;
use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CallStore>,
    pub gateway: Arc<AssistantGateway>,
}

impl AppState {
    pub fn new(store: Arc<dyn CallStore>, gateway: AssistantGateway) -> Self {
        Self {
            store,
            gateway: Arc::new(gateway),
        }
    }
}

/// Assemble every route on one router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/version", get(version))
        .merge(routes::call::router())
        .merge(routes::webhook::router())
        .nest("/assistants", routes::assistants::router())
        .nest("/webinars", routes::webinars::router())
        .with_state(state)
}

pub struct ApiServer {
    bind: String,
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(bind: impl Into<String>, port: u16, state: AppState) -> Self {
        Self {
            bind: bind.into(),
            port,
            state,
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = build_router(self.state);

        let address = format!("{}:{}", self.bind, self.port);
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind API server to {}", address))?;

        info!("API server listening on http://{}", address);
        info!("Endpoints:");
        info!("  GET   /                               - Service info");
        info!("  GET   /version                        - Get version info");
        info!("  GET   /live-webinar/:id/call?attendeeId= - Join the webinar call");
        info!("  GET   /assistants                     - List voice assistants");
        info!("  POST  /assistants                     - Create voice assistant");
        info!("  PATCH /assistants/:id                 - Update voice assistant");
        info!("  GET   /webinars/:id                   - Get webinar");
        info!("  GET   /webinars/:id/pipeline          - Get webinar pipeline");
        info!("  POST  /api/vapi-webhook               - Vapi call events");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "hireflow",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "hireflow"
    }))
}
