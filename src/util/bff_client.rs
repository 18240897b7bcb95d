use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::PageConfig;
use crate::dto::quote_dto::{DeleteQuoteResponse, HandoffResponse};
use crate::model::quote::QuotesListResponse;
use crate::router::quote_router::QUOTES_BASE_PATH;

#[derive(Debug, thiserror::Error)]
pub enum BffClientError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend responded with status {0}")]
    Status(u16),
}

/// Same-origin API the quotes page talks to.
#[async_trait]
pub trait QuotesBackend: Send + Sync {
    async fn list_quotes(&self, search: Option<&str>) -> Result<QuotesListResponse, BffClientError>;
    async fn download_quote(&self, id: i64) -> Result<Bytes, BffClientError>;
    async fn delete_quote(&self, id: i64) -> Result<DeleteQuoteResponse, BffClientError>;
    async fn handoff(&self, intent: Option<&str>) -> Result<HandoffResponse, BffClientError>;
}

#[derive(Debug, Clone)]
pub struct BffClient {
    client: Client,
    base_url: Url,
}

impl BffClient {
    pub fn new(config: &PageConfig) -> Result<Self, BffClientError> {
        Self::with_client(Client::new(), &config.bff_url)
    }

    pub fn with_client(client: Client, bff_url: &str) -> Result<Self, BffClientError> {
        let base = format!("{}{}", bff_url.trim_end_matches('/'), QUOTES_BASE_PATH);
        let base_url = Url::parse(&base).map_err(|e| BffClientError::InvalidUrl(format!("{base}: {e}")))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BffClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BffClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn check(response: reqwest::Response) -> Result<reqwest::Response, BffClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            warn!("Backend responded with {}", status);
            Err(BffClientError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl QuotesBackend for BffClient {
    #[instrument(skip(self))]
    async fn list_quotes(&self, search: Option<&str>) -> Result<QuotesListResponse, BffClientError> {
        let mut url = self.base_url.clone();
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("search", search);
        }
        debug!("GET {}", url);
        let response = Self::check(self.client.get(url).send().await?)?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn download_quote(&self, id: i64) -> Result<Bytes, BffClientError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str(), "download"])?;
        debug!("GET {}", url);
        let response = Self::check(self.client.get(url).send().await?)?;
        Ok(response.bytes().await?)
    }

    #[instrument(skip(self))]
    async fn delete_quote(&self, id: i64) -> Result<DeleteQuoteResponse, BffClientError> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()])?;
        debug!("DELETE {}", url);
        let response = Self::check(self.client.delete(url).send().await?)?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn handoff(&self, intent: Option<&str>) -> Result<HandoffResponse, BffClientError> {
        let url = self.endpoint(&["handoff"])?;
        debug!("POST {}", url);
        let response = Self::check(self.client.post(url).json(&json!({ "intent": intent })).send().await?)?;
        Ok(response.json().await?)
    }
}
