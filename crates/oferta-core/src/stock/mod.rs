//! Stock record extraction from the daily inventory report.

mod parser;
mod pipeline;
pub mod rules;

pub use parser::{parse, GrammarParser, LocationPolicy, ParsedLine, RecordParser, Rejection};
pub use pipeline::{
    extract_file, extract_records, ExtractionReport, LineOutcome, RecordExtractor, ReviewItem,
};
