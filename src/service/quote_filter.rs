use crate::model::quote::{Quote, QuotesListResponse};

/// Client and project names match case-insensitively; the document number
/// matches case-sensitively. Missing fields never match.
pub fn matches_search(quote: &Quote, search: &str) -> bool {
    let needle = search.to_lowercase();
    let contains_folded = |field: &Option<String>| {
        field.as_deref().is_some_and(|v| v.to_lowercase().contains(&needle))
    };

    contains_folded(&quote.cliente)
        || contains_folded(&quote.proyecto)
        || quote.numero.as_deref().is_some_and(|n| n.contains(search))
}

/// Applies `search` to an upstream list. With no (or an empty) term the list
/// and its upstream total pass through; otherwise total is the filtered count.
pub fn filter_quotes(mut list: QuotesListResponse, search: Option<&str>) -> QuotesListResponse {
    let Some(search) = search.filter(|s| !s.is_empty()) else {
        return list;
    };
    list.quotes.retain(|q| matches_search(q, search));
    list.total = list.quotes.len() as u64;
    list
}
