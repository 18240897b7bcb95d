pub mod app_conf;
pub mod quotes_conf;
pub mod page_conf;


pub use app_conf::AppConfig;
pub use quotes_conf::QuotesConfig;
pub use page_conf::{PageConfig, PageMode};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Trims trailing slashes and checks that the value is an http(s) URL.
pub(crate) fn normalize_base_url(name: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue(format!("{name} cannot be empty")));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(format!(
            "{name} must start with http:// or https://, got '{trimmed}'"
        )));
    }
    Ok(trimmed.to_string())
}
