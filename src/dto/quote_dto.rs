use axum::http::HeaderValue;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Intent that sends the user to the "new quote" screen of the quotes web app.
pub const INTENT_NEW: &str = "new";

/// Parsed query of `GET /api/integrations/quotes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuotesQuery {
    pub year: Option<i32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListQuotesQuery {
    /// Unparsable numbers are ignored rather than rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            year: params.get("year").and_then(|v| v.trim().parse().ok()),
            limit: params.get("limit").and_then(|v| v.trim().parse().ok()),
            search: params.get("search").cloned(),
        }
    }
}

/// File bytes relayed from the upstream download endpoint.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Upstream header kept as raw bytes, which may not be ASCII
    pub content_disposition: Option<HeaderValue>,
    pub content: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteQuoteResponse {
    pub success: bool,
}

/// Handoff context. Fields are kept as raw JSON: any intent other than the
/// string `"new"` leads to the quotes list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffRequest {
    #[serde(default)]
    pub intent: Option<Value>,

    /// CRM record the user came from, if any
    #[serde(default)]
    pub record_id: Option<Value>,
}

impl HandoffRequest {
    pub fn with_intent(intent: &str) -> Self {
        Self { intent: Some(Value::from(intent)), record_id: None }
    }

    /// Reads the context out of any JSON document; non-objects carry no intent.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                intent: map.remove("intent").filter(|v| !v.is_null()),
                record_id: map.remove("recordId").filter(|v| !v.is_null()),
            },
            _ => Self::default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.intent.as_ref().and_then(Value::as_str) == Some(INTENT_NEW)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffResponse {
    pub redirect_url: String,
}

/// Fixed error payload returned by the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new<T: Into<String>>(msg: T) -> Self {
        Self { error: msg.into() }
    }
}
