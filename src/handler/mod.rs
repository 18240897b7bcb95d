pub mod quote_handler;
pub mod navigation_handler;
