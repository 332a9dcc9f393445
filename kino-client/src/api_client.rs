use std::time::Duration;

use async_trait::async_trait;
use kino_core::{KinoError, ProgressSink, Result};
use kino_model::{
    FavoriteRequest, MediaItem, MediaTitle, ProgressReport, SubscriptionPlan,
    ViewerId,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::contracts::{MediaItemDto, SubscriptionDto, validate_items};
use crate::source::CatalogSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the remote catalog, favorites, history, subscription and
/// progress endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Add `http://` when no scheme is given and drop trailing slashes, so
/// `localhost:3000/` and `http://localhost:3000` address the same API.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        let raw = base_url.as_ref();
        let base_url = normalize_base_url(raw);
        if base_url != raw {
            warn!("Normalized base URL from '{}' to '{}'", raw, base_url);
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            KinoError::remote(format!("failed to create HTTP client: {e}"))
        })?;

        info!("Creating API client with base URL: {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(&config.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `catalog` or `/favorites`.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref().trim_start_matches('/');
        let path = path.strip_prefix("api/").unwrap_or(path);
        format!("{}/api/{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await.map_err(|e| {
            KinoError::remote(format!("failed to read response body: {e}"))
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| KinoError::remote(format!("malformed payload: {e}")))
    }

    /// Send a request whose response body is ignored.
    async fn execute_no_content(&self, request: RequestBuilder) -> Result<()> {
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| KinoError::remote(format!("request failed: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => {
                Err(KinoError::NotFound(response.url().path().to_string()))
            }
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(KinoError::remote(format!(
                    "Request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    async fn get_items(
        &self,
        path: &str,
        viewer: Option<&ViewerId>,
    ) -> Result<Vec<MediaItem>> {
        let mut request = self.client.get(self.build_url(path));
        if let Some(viewer) = viewer {
            request = request.query(&[("viewerId", viewer.as_str())]);
        }
        let dtos: Vec<MediaItemDto> = self.execute(request).await?;
        let items = validate_items(dtos)?;
        debug!(path, count = items.len(), "fetched media list");
        Ok(items)
    }

    /// The full browsable catalog. A catalog the API reports as missing
    /// (404) is an empty catalog.
    pub async fn fetch_catalog(&self) -> Result<Vec<MediaItem>> {
        empty_on_not_found(self.get_items("catalog", None).await)
    }

    /// A viewer's favorites. A viewer with no favorites list yet (404) has
    /// an empty list.
    pub async fn fetch_favorites(
        &self,
        viewer: &ViewerId,
    ) -> Result<Vec<MediaItem>> {
        empty_on_not_found(self.get_items("favorites", Some(viewer)).await)
    }

    /// A viewer's watch history, most recent as ordered by the API.
    pub async fn fetch_history(
        &self,
        viewer: &ViewerId,
    ) -> Result<Vec<MediaItem>> {
        empty_on_not_found(self.get_items("history", Some(viewer)).await)
    }

    pub async fn add_favorite(
        &self,
        viewer: &ViewerId,
        title: &MediaTitle,
    ) -> Result<()> {
        let body = FavoriteRequest::new(viewer.clone(), title.clone());
        let request = self.client.post(self.build_url("favorites")).json(&body);
        self.execute_no_content(request).await?;
        info!(viewer_id = %viewer, title = %title, "favorite added");
        Ok(())
    }

    pub async fn remove_favorite(
        &self,
        viewer: &ViewerId,
        title: &MediaTitle,
    ) -> Result<()> {
        let body = FavoriteRequest::new(viewer.clone(), title.clone());
        let request =
            self.client.delete(self.build_url("favorites")).json(&body);
        self.execute_no_content(request).await?;
        info!(viewer_id = %viewer, title = %title, "favorite removed");
        Ok(())
    }

    /// The viewer's plan, or `None` when they have no subscription.
    pub async fn fetch_subscription(
        &self,
        viewer: &ViewerId,
    ) -> Result<Option<SubscriptionPlan>> {
        let request = self
            .client
            .get(self.build_url("subscription"))
            .query(&[("viewerId", viewer.as_str())]);
        match self.execute::<SubscriptionDto>(request).await {
            Ok(dto) => dto.validate().map(Some),
            Err(KinoError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Post one progress report. Success or failure only; the body of the
    /// response is ignored.
    pub async fn update_progress(&self, report: &ProgressReport) -> Result<()> {
        let request = self.client.post(self.build_url("progress")).json(report);
        self.execute_no_content(request).await
    }
}

fn empty_on_not_found(result: Result<Vec<MediaItem>>) -> Result<Vec<MediaItem>> {
    match result {
        Err(KinoError::NotFound(_)) => Ok(Vec::new()),
        other => other,
    }
}

#[async_trait]
impl ProgressSink for ApiClient {
    async fn update_progress(&self, report: &ProgressReport) -> Result<()> {
        ApiClient::update_progress(self, report).await
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_catalog(&self) -> Result<Vec<MediaItem>> {
        ApiClient::fetch_catalog(self).await
    }

    async fn fetch_favorites(
        &self,
        viewer: &ViewerId,
    ) -> Result<Vec<MediaItem>> {
        ApiClient::fetch_favorites(self, viewer).await
    }

    async fn fetch_history(&self, viewer: &ViewerId) -> Result<Vec<MediaItem>> {
        ApiClient::fetch_history(self, viewer).await
    }
}
