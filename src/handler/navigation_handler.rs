use axum::{response::IntoResponse, Json};

use crate::ui::navigation::main_drawer_items;

// Handler: drawer entries contributed by this integration
pub async fn navigation_handler() -> impl IntoResponse {
    Json(main_drawer_items())
}
