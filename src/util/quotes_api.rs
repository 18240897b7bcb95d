use async_trait::async_trait;
use reqwest::{header::CONTENT_DISPOSITION, Client, Url};
use tracing::{debug, error, info, instrument, warn};

use crate::config::QuotesConfig;
use crate::dto::quote_dto::DownloadedFile;
use crate::model::quote::QuotesListResponse;

#[derive(Debug, thiserror::Error)]
pub enum QuotesApiError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream responded with status {0}")]
    Status(u16),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

/// The external quotes REST API.
#[async_trait]
pub trait QuotesApi: Send + Sync {
    /// `GET /quotes?year&limit`
    async fn list(&self, year: Option<i32>, limit: Option<u32>) -> Result<QuotesListResponse, QuotesApiError>;
    /// `GET /quotes/{id}/download`
    async fn download(&self, id: &str) -> Result<DownloadedFile, QuotesApiError>;
    /// `DELETE /quotes/{id}`, returning whether the upstream status was 2xx
    async fn delete(&self, id: &str) -> Result<bool, QuotesApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpQuotesApi {
    client: Client,
    base_url: Url,
}

impl HttpQuotesApi {
    pub fn new(config: &QuotesConfig) -> Result<Self, QuotesApiError> {
        Self::with_client(Client::new(), &config.api_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, QuotesApiError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            error!("Failed to parse quotes API URL '{}': {}", base_url, e);
            QuotesApiError::InvalidUrl(format!("{base_url}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(QuotesApiError::InvalidUrl(base_url.to_string()));
        }
        info!("Quotes API client targeting {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, QuotesApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QuotesApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl QuotesApi for HttpQuotesApi {
    #[instrument(skip(self))]
    async fn list(&self, year: Option<i32>, limit: Option<u32>) -> Result<QuotesListResponse, QuotesApiError> {
        let mut url = self.endpoint(&["quotes"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(year) = year.filter(|y| *y != 0) {
                pairs.append_pair("year", &year.to_string());
            }
            if let Some(limit) = limit.filter(|l| *l != 0) {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        // drop the dangling '?' when nothing was appended
        if url.query() == Some("") {
            url.set_query(None);
        }
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Upstream list responded with {}", status);
            return Err(QuotesApiError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        let list: QuotesListResponse = serde_json::from_slice(&body)
            .map_err(|e| QuotesApiError::Decode(e.to_string()))?;
        info!("Upstream returned {} quotes", list.quotes.len());
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn download(&self, id: &str) -> Result<DownloadedFile, QuotesApiError> {
        let url = self.endpoint(&["quotes", id, "download"])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Upstream download responded with {}", status);
            return Err(QuotesApiError::Status(status.as_u16()));
        }
        let content_disposition = response.headers().get(CONTENT_DISPOSITION).cloned();
        let content = response.bytes().await?;
        info!("Downloaded quote {} ({} bytes)", id, content.len());
        Ok(DownloadedFile { content_disposition, content })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool, QuotesApiError> {
        let url = self.endpoint(&["quotes", id])?;
        debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        let status = response.status();
        info!("Upstream delete of quote {} responded with {}", id, status);
        Ok(status.is_success())
    }
}
