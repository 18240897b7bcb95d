use serde::{Deserialize, Serialize};

/// Creation timestamp as the quotes service reports it: either an ISO-8601
/// string or epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    Epoch(i64),
    Iso(String),
}

/// A quote owned by the upstream quotes service. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub ruc: Option<String>,
    #[serde(default)]
    pub proyecto: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub filepath: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotesListResponse {
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub total: u64,
}

impl QuotesListResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}
