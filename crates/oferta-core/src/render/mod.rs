//! Outputs built from the filtered records.

mod convert;
mod document;
mod summary;

pub use convert::Converter;
pub use document::{OfferDocument, ROWS, TOTAL, VALID_UNTIL};
pub use summary::{write_summary, SummaryWriter};
