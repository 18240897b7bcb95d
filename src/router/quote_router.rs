use axum::{Router, routing::{delete, get, post}};
use crate::handler::quote_handler::{
    list_quotes_handler,
    download_quote_handler,
    delete_quote_handler,
    handoff_handler,
};
use std::sync::Arc;
use crate::service::quote_service::QuoteServiceImpl;

pub const QUOTES_BASE_PATH: &str = "/api/integrations/quotes";

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    let routes = Router::new()
        .route("/", get(list_quotes_handler))
        .route("/handoff", post(handoff_handler))
        .route("/{id}/download", get(download_quote_handler))
        .route("/{id}", delete(delete_quote_handler))
        .with_state(service);

    Router::new().nest(QUOTES_BASE_PATH, routes)
}
