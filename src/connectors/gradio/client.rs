use super::events;
use crate::configuration::ChatSettings;
use crate::connectors::chat::{ChatBackend, ChatBackendFactory, Prediction};
use crate::connectors::errors::ConnectorError;
use crate::forms::chat::HistoryMessage;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Resolve a space id to the base URL of its Gradio app.
///
/// `owner/name` becomes `https://owner-name.hf.space`; full URLs are kept.
pub fn space_url(space: &str) -> String {
    let space = space.trim();
    if space.starts_with("http://") || space.starts_with("https://") {
        return space.trim_end_matches('/').to_string();
    }

    let subdomain: String = space
        .trim_matches('/')
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '/' | '_' | '.' => '-',
            other => other,
        })
        .collect();
    format!("https://{}.hf.space", subdomain)
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default)]
    api_prefix: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueuedCall {
    event_id: String,
}

/// Creates [`GradioClient`]s for the configured space.
pub struct GradioConnector {
    base_url: String,
    api_name: String,
    auth_header: Option<String>,
    http_client: reqwest::Client,
}

impl GradioConnector {
    pub fn new(settings: &ChatSettings) -> Result<Self, ConnectorError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("portfolio-api/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = settings.timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: space_url(&settings.space),
            api_name: settings.api_name.trim_matches('/').to_string(),
            auth_header: settings
                .hf_token
                .as_ref()
                .map(|token| format!("Bearer {}", token)),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatBackendFactory for GradioConnector {
    #[tracing::instrument(name = "Connect to Gradio app", skip(self), fields(base_url = %self.base_url))]
    async fn connect(&self) -> Result<Arc<dyn ChatBackend>, ConnectorError> {
        let request = self
            .http_client
            .get(format!("{}/config", self.base_url));
        let response = ensure_success(authorize(request, &self.auth_header).send().await?).await?;

        let config: AppConfig = response.json().await.map_err(|err| {
            ConnectorError::InvalidResponse(format!("Gradio config could not be parsed: {}", err))
        })?;

        let api_prefix = config
            .api_prefix
            .map(|prefix| prefix.trim_end_matches('/').to_string())
            .unwrap_or_default();
        tracing::info!(
            gradio_version = config.version.as_deref().unwrap_or("unknown"),
            api_prefix = %api_prefix,
            "Connected to Gradio app"
        );

        Ok(Arc::new(GradioClient {
            http_client: self.http_client.clone(),
            endpoint: format!("{}{}/call/{}", self.base_url, api_prefix, self.api_name),
            auth_header: self.auth_header.clone(),
        }))
    }
}

/// Connected handle bound to one named endpoint of the app.
pub struct GradioClient {
    http_client: reqwest::Client,
    endpoint: String,
    auth_header: Option<String>,
}

#[async_trait]
impl ChatBackend for GradioClient {
    #[tracing::instrument(
        name = "Gradio prediction",
        skip(self, message, history),
        fields(endpoint = %self.endpoint, history_len = history.len())
    )]
    async fn predict(
        &self,
        message: &str,
        history: &[HistoryMessage],
    ) -> Result<Prediction, ConnectorError> {
        let payload = json!({ "data": [message, history] });

        let request = self.http_client.post(&self.endpoint).json(&payload);
        let queued: QueuedCall = ensure_success(authorize(request, &self.auth_header).send().await?)
            .await?
            .json()
            .await
            .map_err(|err| {
                ConnectorError::InvalidResponse(format!("missing event_id in call response: {}", err))
            })?;
        tracing::debug!(event_id = %queued.event_id, "Prediction queued");

        let request = self
            .http_client
            .get(format!("{}/{}", self.endpoint, queued.event_id));
        let body = ensure_success(authorize(request, &self.auth_header).send().await?)
            .await?
            .text()
            .await?;

        events::prediction(events::completed_output(&body)?)
    }
}

fn authorize(request: RequestBuilder, auth_header: &Option<String>) -> RequestBuilder {
    match auth_header {
        Some(auth) => request.header("Authorization", auth),
        None => request,
    }
}

async fn ensure_success(response: Response) -> Result<Response, ConnectorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = format!("{} returned {}: {}", url, status, body.trim());
    if status.is_server_error() {
        Err(ConnectorError::ServiceUnavailable(message))
    } else {
        Err(ConnectorError::HttpError(message))
    }
}
