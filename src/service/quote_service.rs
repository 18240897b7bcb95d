use std::sync::Arc;
use tracing::{info, error, instrument};

use crate::config::QuotesConfig;
use crate::dto::quote_dto::{
    DeleteQuoteResponse, DownloadedFile, HandoffRequest, HandoffResponse, ListQuotesQuery,
};
use crate::model::quote::QuotesListResponse;
use crate::service::quote_filter::filter_quotes;
use crate::util::error::ServiceError;
use crate::util::quotes_api::{HttpQuotesApi, QuotesApi, QuotesApiError};

use async_trait::async_trait;

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Never fails: upstream errors degrade to an empty list.
	async fn list_quotes(&self, query: ListQuotesQuery) -> QuotesListResponse;
	async fn download_quote(&self, id: &str) -> Result<DownloadedFile, ServiceError>;
	/// Never fails: network errors report `success: false`.
	async fn delete_quote(&self, id: &str) -> DeleteQuoteResponse;
	fn handoff(&self, request: &HandoffRequest) -> HandoffResponse;
}

pub struct QuoteServiceImpl {
	pub quotes_api: Arc<dyn QuotesApi>,
	pub config: QuotesConfig,
}

impl QuoteServiceImpl {
	pub fn new(config: QuotesConfig) -> Result<Self, QuotesApiError> {
		let quotes_api = Arc::new(HttpQuotesApi::new(&config)?);
		Ok(QuoteServiceImpl { quotes_api, config })
	}

	pub fn with_api(quotes_api: Arc<dyn QuotesApi>, config: QuotesConfig) -> Self {
		QuoteServiceImpl { quotes_api, config }
	}
}


#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self), fields(year = ?query.year, limit = ?query.limit, search = ?query.search))]
	async fn list_quotes(&self, query: ListQuotesQuery) -> QuotesListResponse {
		info!("Listing quotes");
		let limit = query.limit.or(Some(self.config.default_limit));
		match self.quotes_api.list(query.year, limit).await {
			Ok(list) => {
				let filtered = filter_quotes(list, query.search.as_deref());
				info!("Returning {} quotes", filtered.quotes.len());
				filtered
			},
			Err(e) => {
				error!("Failed to list quotes: {e}");
				QuotesListResponse::empty()
			}
		}
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn download_quote(&self, id: &str) -> Result<DownloadedFile, ServiceError> {
		info!("Downloading quote file");
		let res = self.quotes_api.download(id).await;
		match &res {
			Ok(file) => info!("Quote file fetched ({} bytes)", file.content.len()),
			Err(e) => error!("Failed to download quote: {e}"),
		}
		res.map_err(ServiceError::from)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_quote(&self, id: &str) -> DeleteQuoteResponse {
		info!("Deleting quote");
		let success = match self.quotes_api.delete(id).await {
			Ok(success) => success,
			Err(e) => {
				error!("Failed to delete quote: {e}");
				false
			}
		};
		DeleteQuoteResponse { success }
	}

	#[instrument(skip(self), fields(intent = ?request.intent, record_id = ?request.record_id))]
	fn handoff(&self, request: &HandoffRequest) -> HandoffResponse {
		let redirect_url = if request.is_new() {
			self.config.web_url.clone()
		} else {
			self.config.web_quotes_url()
		};
		info!("Handing off to {}", redirect_url);
		HandoffResponse { redirect_url }
	}
}
