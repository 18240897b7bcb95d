use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;

use crate::util::quotes_api::QuotesApiError;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}


#[derive(Debug, Clone)]
pub enum ServiceError {
    NotFound(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}
impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// Any non-success answer from upstream is reported as not found
impl From<QuotesApiError> for ServiceError {
    fn from(err: QuotesApiError) -> Self {
        match err {
            QuotesApiError::Status(code) => ServiceError::NotFound(format!("Upstream status {}", code)),
            other => ServiceError::InternalError(other.to_string()),
        }
    }
}
