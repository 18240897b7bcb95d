use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::quote::{CreatedAt, Quote};

/// Rendered for missing or zero values.
pub const PLACEHOLDER: &str = "-";
/// Quotes are priced in Peruvian soles.
pub const CURRENCY_CODE: &str = "PEN";
const CURRENCY_SYMBOL: &str = "S/";

/// Formats an amount as `S/ 1,234.50` (es-PE grouping, two decimals).
pub fn format_currency(amount: Option<f64>) -> String {
    let value = match amount {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => return PLACEHOLDER.to_string(),
    };

    let cents = (value.abs() * 100.0).round() as u128;
    let units = group_thousands(cents / 100);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL} {units}.{:02}", cents % 100)
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a creation timestamp as a short `dd/mm/yyyy` date in UTC.
pub fn format_date(created_at: Option<&CreatedAt>) -> String {
    let date = match created_at {
        Some(CreatedAt::Epoch(0)) | None => None,
        Some(CreatedAt::Epoch(secs)) => DateTime::<Utc>::from_timestamp(*secs, 0).map(|dt| dt.date_naive()),
        Some(CreatedAt::Iso(s)) => parse_iso_date(s),
    };
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // naive timestamps are taken as UTC
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Name the browser saves a downloaded quote under. Without a document
/// number the upstream file name is used, then the quote id.
pub fn download_filename(quote: &Quote) -> String {
    match quote.numero.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(numero) => format!("COT-{}-{}.xlsx", quote.year, numero),
        None => match quote.filename.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            Some(filename) => filename.to_string(),
            None => format!("COT-{}-{}.xlsx", quote.year, quote.id),
        },
    }
}
