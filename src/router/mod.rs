pub mod quote_router;
pub mod navigation_router;
