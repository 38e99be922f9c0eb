use anyhow::{anyhow, Context, Result};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error, info};

use super::assistant::{Assistant, AssistantConfig};
use super::error::ProviderError;

pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = std::result::Result<T, ProviderError>> + Send + 'a>>;

/// Remote service that hosts voice assistants.
pub trait AssistantProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn list<'a>(&'a self) -> ProviderFuture<'a, Vec<Assistant>>;

    fn create<'a>(&'a self, config: &'a AssistantConfig) -> ProviderFuture<'a, Assistant>;

    fn update<'a>(
        &'a self,
        assistant_id: &'a str,
        config: &'a AssistantConfig,
    ) -> ProviderFuture<'a, Assistant>;
}

pub const DEFAULT_BASE_URL: &str = "https://api.vapi.ai";

/// Client for the Vapi REST API.
pub struct VapiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl VapiClient {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let raw = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .with_context(|| format!("Invalid Vapi API base URL: {}", raw))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid Vapi API base URL: {}", raw));
        }

        info!("Initialized Vapi client with base URL: {}", base_url);

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base URL plus path segments. Each segment is percent-encoded, so an id
    /// can never add segments or a query of its own.
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> std::result::Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("Sending {} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .bearer_auth(&self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                "Vapi API {} {} failed with status {}: {}",
                method,
                url.path(),
                status,
                response_text
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}

impl AssistantProvider for VapiClient {
    fn name(&self) -> &'static str {
        "Vapi API"
    }

    fn list<'a>(&'a self) -> ProviderFuture<'a, Vec<Assistant>> {
        Box::pin(async move { self.send::<(), _>(Method::GET, &["assistant"], None).await })
    }

    fn create<'a>(&'a self, config: &'a AssistantConfig) -> ProviderFuture<'a, Assistant> {
        Box::pin(async move { self.send(Method::POST, &["assistant"], Some(config)).await })
    }

    fn update<'a>(
        &'a self,
        assistant_id: &'a str,
        config: &'a AssistantConfig,
    ) -> ProviderFuture<'a, Assistant> {
        Box::pin(async move {
            self.send(Method::PATCH, &["assistant", assistant_id], Some(config))
                .await
        })
    }
}
