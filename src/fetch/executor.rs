use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{AppError, Context, Result};

use super::request::ApiRequest;
use super::response::ApiResponse;

/// Performs the network call for a prepared request and decodes the typed payload.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Send + 'static;
}

/// Single-shot GET executor over `reqwest`.
pub struct RestExecutor {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RestExecutor {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to construct HTTP client")?;
        Ok(Self {
            client,
            base_url,
            token: config.token,
        })
    }

    /// Full URL for `request`, with the configured token appended to the query.
    pub fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        let mut query = request.query.clone();
        if let Some(token) = &self.token {
            query.add("token", token.as_str());
        }

        let path = request.render_path()?;
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Failed to join {} onto {}", path, self.base_url))?;
        // Query pairs are already encoded; commas stay literal.
        url.set_query((!query.is_empty()).then(|| query.build()).as_deref());
        Ok(url)
    }
}

/// Parse the configured base URL, keeping its path as a directory so joins append to it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL `{}`", raw))?;
    if url.cannot_be_a_base() {
        return Err(AppError::message(format!(
            "Base URL `{}` cannot carry a path",
            raw
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turn a status and body into the executor envelope: non-2xx keeps the server text,
/// 2xx must decode into `T`.
fn into_api_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    pattern: &str,
) -> Result<ApiResponse<T>> {
    if !status.is_success() {
        debug!("{} returned {}", pattern, status);
        return Ok(ApiResponse::failure(format!("{} - {}", status, body.trim())));
    }

    let data: T = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse response for {}", pattern))?;
    Ok(ApiResponse::success(data))
}

#[async_trait]
impl Executor for RestExecutor {
    async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.build_url(&request)?;
        debug!("GET {}", request.path_and_query()?);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {}", request.url_pattern))?;

        into_api_response(status, &body, request.url_pattern)
    }
}
