pub mod quotes_api;
pub mod bff_client;
pub mod logger;
pub mod error;
