//! Record parser: tokenizer and backtracking matcher for report lines.
//!
//! A record line reads, whitespace separated:
//!
//! ```text
//! code serial description... quantity unit [location] brand... price
//! ```
//!
//! `description` is lazy: it ends at the first `quantity unit` pair from
//! which the rest of the line still matches. Between the unit and the price
//! there is one optional `location` token followed by a non-empty brand;
//! which of the two a token lands in is decided by [`LocationPolicy`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::record::{Record, Unit};

use super::rules::{parse_report_price, CODE_TOKEN, PRICE_TOKEN, QUANTITY_TOKEN};

/// Fewest tokens a record line can have:
/// code, serial, description, quantity, unit, brand, price.
const MIN_TOKENS: usize = 7;

/// Tie-break between `location` and `brand` when both splits match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPolicy {
    /// With two or more tokens between unit and price, the first one is
    /// the location.
    #[default]
    PreferPresent,
    /// Location is always left empty and the brand takes every token.
    PreferAbsent,
}

/// Why a candidate line did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not enough tokens for the grammar.
    TooFewTokens,
    /// First token is not a digit code.
    InvalidCode,
    /// Last token is not a price token.
    InvalidPriceToken,
    /// No `quantity unit` pair leaves room for a brand and price.
    NoUnitBoundary,
    /// Quantity does not fit a 64-bit integer.
    QuantityOutOfRange,
    /// Price token does not convert to a decimal.
    InvalidPrice,
}

/// A successfully parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// The extracted record.
    pub record: Record,
    /// Both an empty and a non-empty location matched this line, so the
    /// split was decided by the location policy.
    pub location_ambiguous: bool,
}

/// Trait for line-to-record parsers.
pub trait RecordParser {
    /// Parse a candidate line, reporting why it was rejected.
    fn parse_line(&self, line: &str) -> Result<ParsedLine, Rejection>;

    /// Parse a candidate line into a record.
    fn parse(&self, line: &str) -> Option<Record> {
        self.parse_line(line).ok().map(|parsed| parsed.record)
    }
}

/// Whitespace-delimited token with its byte span in the line.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token { text: &line[s..i], start: s, end: i });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(Token { text: &line[s..], start: s, end: line.len() });
    }

    tokens
}

/// Text from the start of token `first` to the end of token `last`,
/// original spacing included.
fn span<'a>(line: &'a str, tokens: &[Token<'_>], first: usize, last: usize) -> &'a str {
    &line[tokens[first].start..tokens[last].end]
}

/// Parser for the fixed inventory report grammar.
#[derive(Debug, Clone, Default)]
pub struct GrammarParser {
    location_policy: LocationPolicy,
}

impl GrammarParser {
    /// Create a parser with the default location policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location tie-break policy.
    pub fn with_location_policy(mut self, policy: LocationPolicy) -> Self {
        self.location_policy = policy;
        self
    }

    /// The active location policy.
    pub fn location_policy(&self) -> LocationPolicy {
        self.location_policy
    }

    /// Index of the quantity token: the first `quantity unit` pair that
    /// leaves at least one description token before it and one brand token
    /// before the price.
    fn find_quantity(tokens: &[Token<'_>]) -> Option<usize> {
        let last_candidate = tokens.len().checked_sub(4)?;
        (3..=last_candidate).find(|&q| {
            QUANTITY_TOKEN.is_match(tokens[q].text) && Unit::from_code(tokens[q + 1].text).is_some()
        })
    }
}

impl RecordParser for GrammarParser {
    fn parse_line(&self, line: &str) -> Result<ParsedLine, Rejection> {
        let line = line.trim();
        let tokens = tokenize(line);
        let n = tokens.len();

        if n < MIN_TOKENS {
            return Err(Rejection::TooFewTokens);
        }
        if !CODE_TOKEN.is_match(tokens[0].text) {
            return Err(Rejection::InvalidCode);
        }
        let price_idx = n - 1;
        if !PRICE_TOKEN.is_match(tokens[price_idx].text) {
            return Err(Rejection::InvalidPriceToken);
        }

        let q = Self::find_quantity(&tokens).ok_or(Rejection::NoUnitBoundary)?;
        let unit = Unit::from_code(tokens[q + 1].text).ok_or(Rejection::NoUnitBoundary)?;

        // Tokens between the unit and the price
        let middle = (q + 2)..price_idx;
        let location_ambiguous = middle.len() >= 2;

        let (location, brand_start) = match self.location_policy {
            LocationPolicy::PreferPresent if location_ambiguous => {
                (tokens[middle.start].text.to_string(), middle.start + 1)
            }
            _ => (String::new(), middle.start),
        };

        let quantity: i64 = tokens[q]
            .text
            .parse()
            .map_err(|_| Rejection::QuantityOutOfRange)?;
        let price = parse_report_price(tokens[price_idx].text).ok_or(Rejection::InvalidPrice)?;

        let record = Record {
            code: tokens[0].text.to_string(),
            serial: tokens[1].text.to_string(),
            description: span(line, &tokens, 2, q - 1).to_string(),
            quantity,
            unit,
            location,
            brand: span(line, &tokens, brand_start, price_idx - 1).to_string(),
            price,
        };

        trace!(
            "Parsed record {} (qty {} {}, ambiguous location: {})",
            record.code, record.quantity, record.unit, location_ambiguous
        );

        Ok(ParsedLine {
            record,
            location_ambiguous,
        })
    }
}

/// Parse a report line with the default grammar parser.
pub fn parse(line: &str) -> Option<Record> {
    GrammarParser::new().parse(line)
}
