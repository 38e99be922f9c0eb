use crate::api::{ApiServer, AppState};
use crate::config::Config;
use crate::db::SqliteStore;
use crate::vapi::{AssistantGateway, AssistantTemplate, VapiClient};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn run_service() -> Result<()> {
    info!("Starting HireFlow service");

    let config = Config::load()?;

    let db_path = config.database_path()?;
    let store = SqliteStore::open(&db_path)?;
    info!("Using database at {:?}", db_path);

    let gateway = build_gateway(&config)?;
    info!(
        "Assistants will report call events to {}",
        gateway.template().webhook_url()
    );

    let state = AppState::new(Arc::new(store), gateway);
    let server = ApiServer::new(config.server.bind.clone(), config.server.port, state);

    info!("HireFlow is ready!");
    server.start().await
}

/// Build the assistant gateway against the configured Vapi account.
pub fn build_gateway(config: &Config) -> Result<AssistantGateway> {
    let api_key = config
        .vapi
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            anyhow!(
                "Vapi API key is not configured. Set {} or add api_key under [vapi] in {}",
                crate::config::API_KEY_ENV,
                crate::global::config_file()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            )
        })?;

    let client = VapiClient::new(
        api_key,
        Some(config.vapi.api_base_url.clone()),
        Duration::from_secs(config.vapi.request_timeout_seconds),
    )?;

    let template = AssistantTemplate::new(config.assistant.clone(), config.webhook_url());
    Ok(AssistantGateway::new(Arc::new(client), template))
}
