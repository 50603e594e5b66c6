//! Token patterns for the inventory report grammar.

use lazy_static::lazy_static;
use regex::Regex;

/// Substrings marking report boilerplate: column headers, issuer banner,
/// emission timestamp and page footer.
pub const NOISE_MARKERS: [&str; 6] = [
    "Código",
    "Codigo",
    "TARUMA",
    "Emitido",
    "Pagina",
    "Página",
];

lazy_static! {
    // Table separator rows
    pub static ref SEPARATOR: Regex = Regex::new(r"-{5}").unwrap();

    // Field tokens (ASCII digits only)
    pub static ref CODE_TOKEN: Regex = Regex::new(r"^[0-9]+$").unwrap();

    pub static ref QUANTITY_TOKEN: Regex = Regex::new(r"^-?[0-9]+$").unwrap();

    pub static ref PRICE_TOKEN: Regex = Regex::new(r"^[0-9,]+$").unwrap();
}
