use serde::{Deserialize, Serialize};

/// A link rendered in the main navigation drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub label: String,
    pub to: String,
    pub icon: String,
}

pub const QUOTES_ROUTE: &str = "/quotes";

pub fn quotes_navigation_item() -> NavigationItem {
    NavigationItem {
        label: "Cotizaciones".to_string(),
        to: QUOTES_ROUTE.to_string(),
        icon: "IconTable".to_string(),
    }
}

/// Scrollable drawer entries contributed by this integration, quotes first.
pub fn main_drawer_items() -> Vec<NavigationItem> {
    vec![quotes_navigation_item()]
}
