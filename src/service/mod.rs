pub mod quote_filter;
pub mod quote_service;
