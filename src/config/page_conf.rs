use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{debug, warn};
use crate::config::{normalize_base_url, ConfigError};
use crate::config::quotes_conf::DEFAULT_QUOTES_WEB_URL;

pub const DEFAULT_BFF_URL: &str = "http://localhost:8080";

/// How the quotes page renders its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    Table,
    Iframe,
}

impl FromStr for PageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(PageMode::Table),
            "iframe" => Ok(PageMode::Iframe),
            other => Err(ConfigError::ParseError(format!("Unknown page mode: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Same-origin base URL of this backend
    pub bff_url: String,
    /// Quotes web application, embedded in iframe mode
    pub web_url: String,
    pub mode: PageMode,
}

impl PageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bff_url = env::var("QUOTES_BFF_URL").unwrap_or_else(|_| DEFAULT_BFF_URL.to_string());
        let bff_url = normalize_base_url("QUOTES_BFF_URL", &bff_url)?;

        let web_url = env::var("QUOTES_WEB_URL").unwrap_or_else(|_| DEFAULT_QUOTES_WEB_URL.to_string());
        let web_url = normalize_base_url("QUOTES_WEB_URL", &web_url)?;

        let mode = match env::var("QUOTES_PAGE_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => {
                warn!("QUOTES_PAGE_MODE not set, defaulting to table");
                PageMode::Table
            }
        };
        debug!("Quotes page: bff={}, web={}, mode={:?}", bff_url, web_url, mode);

        Ok(Self { bff_url, web_url, mode })
    }

    pub fn iframe_src(&self) -> String {
        format!("{}/quotes", self.web_url)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            bff_url: DEFAULT_BFF_URL.to_string(),
            web_url: DEFAULT_QUOTES_WEB_URL.to_string(),
            mode: PageMode::Table,
        }
    }
}
