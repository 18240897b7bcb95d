use axum::{Router, routing::get};
use std::sync::Arc;
use tracing::info;
use crate::config::{AppConfig, QuotesConfig};
use crate::service::quote_service::QuoteServiceImpl;


pub struct App {
    config: AppConfig,
    router: Router,
    pub quote_service: Arc<QuoteServiceImpl>,
}

impl App {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let quotes_config = QuotesConfig::from_env()?;
        Self::with_config(config, quotes_config)
    }

    pub fn with_config(config: AppConfig, quotes_config: QuotesConfig) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Proxying quotes to {}", quotes_config.api_url);
        let quote_service = Arc::new(QuoteServiceImpl::new(quotes_config)?);
        let router = create_router(quote_service.clone());
        Ok(App { config, router, quote_service })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

pub fn create_router(quote_service: Arc<QuoteServiceImpl>) -> Router {
    use crate::router::quote_router::quote_router;
    use crate::router::navigation_router::navigation_router;
    Router::new()
        .merge(quote_router(quote_service))
        .merge(navigation_router())
        .route("/health", get(|| async { "OK" }))
}
