use axum::{Router, routing::get};
use crate::handler::navigation_handler::navigation_handler;

pub fn navigation_router() -> Router {
    Router::new().route("/api/navigation", get(navigation_handler))
}
