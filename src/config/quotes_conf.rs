use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info, warn};
use crate::config::{normalize_base_url, ConfigError};

pub const DEFAULT_QUOTES_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_QUOTES_WEB_URL: &str = "http://localhost:5173";
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Location of the external quotes service, injected into the service at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Base URL of the upstream quotes REST API
    pub api_url: String,
    /// Base URL of the quotes web application users are handed off to
    pub web_url: String,
    /// Limit forwarded upstream when the caller does not pass one
    pub default_limit: u32,
}

impl QuotesConfig {
    /// Load quotes integration configuration from environment variables
    ///
    /// Expected environment variables:
    /// - QUOTES_API_URL: upstream REST API (defaults to "http://localhost:8000")
    /// - QUOTES_WEB_URL: quotes web application (defaults to "http://localhost:5173")
    /// - QUOTES_DEFAULT_LIMIT: list limit when none is given (defaults to 50)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading quotes integration configuration from environment variables");

        let api_url = env::var("QUOTES_API_URL").unwrap_or_else(|_| {
            warn!("QUOTES_API_URL not set, using default: {}", DEFAULT_QUOTES_API_URL);
            DEFAULT_QUOTES_API_URL.to_string()
        });
        let api_url = normalize_base_url("QUOTES_API_URL", &api_url)?;
        debug!("Quotes API URL: {}", api_url);

        let web_url = env::var("QUOTES_WEB_URL").unwrap_or_else(|_| {
            warn!("QUOTES_WEB_URL not set, using default: {}", DEFAULT_QUOTES_WEB_URL);
            DEFAULT_QUOTES_WEB_URL.to_string()
        });
        let web_url = normalize_base_url("QUOTES_WEB_URL", &web_url)?;
        debug!("Quotes web URL: {}", web_url);

        let default_limit = match env::var("QUOTES_DEFAULT_LIMIT") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                ConfigError::ParseError(format!("QUOTES_DEFAULT_LIMIT must be a positive integer, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_LIST_LIMIT,
        };
        debug!("Default list limit: {}", default_limit);

        let config = Self { api_url, web_url, default_limit };
        config.validate()?;

        info!("Quotes integration configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_base_url("QUOTES_API_URL", &self.api_url)?;
        normalize_base_url("QUOTES_WEB_URL", &self.web_url)?;
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "QUOTES_DEFAULT_LIMIT must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Handoff target for the "list" intent
    pub fn web_quotes_url(&self) -> String {
        format!("{}/quotes", self.web_url)
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_QUOTES_API_URL.to_string(),
            web_url: DEFAULT_QUOTES_WEB_URL.to_string(),
            default_limit: DEFAULT_LIST_LIMIT,
        }
    }
}
