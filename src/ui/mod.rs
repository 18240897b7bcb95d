pub mod format;
pub mod navigation;
pub mod quotes_page;
