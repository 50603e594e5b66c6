//! Price tokens: digits with a comma decimal separator.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::PRICE_TOKEN;

/// Parse a report price token (e.g. "1234,56").
///
/// Only digits and commas are accepted. The comma becomes the decimal
/// point; a token that then holds more than one decimal point, or no digit
/// at all, is rejected.
pub fn parse_report_price(token: &str) -> Option<Decimal> {
    if !PRICE_TOKEN.is_match(token) {
        return None;
    }

    let normalized = token.replace(',', ".");
    if normalized.matches('.').count() > 1 || !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    // "5," and ",5" are valid prices
    let padded = match (normalized.starts_with('.'), normalized.ends_with('.')) {
        (true, _) => format!("0{}", normalized),
        (_, true) => format!("{}0", normalized),
        _ => normalized,
    };

    Decimal::from_str(&padded).ok()
}

/// Format a price the way the report prints it, keeping its scale.
pub fn format_report_price(price: Decimal) -> String {
    price.to_string().replace('.', ",")
}
