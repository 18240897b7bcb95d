use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::dto::quote_dto::{ErrorBody, HandoffRequest, ListQuotesQuery};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const DEFAULT_CONTENT_DISPOSITION: &str = "attachment; filename=\"cotizacion.xlsx\"";

// Handler: List Quotes
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let query = ListQuotesQuery::from_params(&params);
    Json(service.list_quotes(query).await)
}

// Handler: Download Quote file
pub async fn download_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Response {
    let file = match service.download_quote(&id).await {
        Ok(file) => file,
        Err(ServiceError::NotFound(msg)) => {
            warn!("[download_quote_handler] Quote {} not found: {}", id, msg);
            return (StatusCode::NOT_FOUND, Json(ErrorBody::new("Quote not found"))).into_response();
        }
        Err(e) => {
            error!("[download_quote_handler] Failed to download quote {}: {}", id, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new("Failed to download quote")))
                .into_response();
        }
    };

    let disposition = file
        .content_disposition
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_DISPOSITION));

    info!("[download_quote_handler] Sending {} bytes for quote {}", file.content.len(), id);
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    )
        .into_response()
}

// Handler: Delete Quote
pub async fn delete_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(service.delete_quote(&id).await)
}

// Handler: Handoff to the quotes web application
//
// An empty body is accepted and treated as no intent. Any JSON document gets a
// redirect; only bodies that are not JSON at all are rejected.
pub async fn handoff_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    body: Bytes,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        HandoffRequest::default()
    } else {
        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            error!("[handoff_handler] Invalid JSON: {}", e);
            HandlerError {
                error: HandlerErrorKind::BadRequest,
                message: INVALID_BODY_MESSAGE.to_string(),
                details: None,
            }
        })?;
        HandoffRequest::from_json(value)
    };
    Ok(Json(service.handoff(&payload)))
}
