//! Core library for the daily stock offer.
//!
//! This crate provides:
//! - Report sources (PDF via lopdf/pdf-extract, plain text exports)
//! - Line classification and record parsing for the inventory report
//! - Stock threshold filtering and the extraction pipeline
//! - Summary text, offer document rendering and external conversion

pub mod error;
pub mod models;
pub mod pdf;
pub mod render;
pub mod stock;

pub use error::{ExtractionError, OfertaError, RenderError, Result, SourceError};
pub use models::config::OfertaConfig;
pub use models::record::{Record, Unit};
pub use pdf::{load_pages, PageSource, PdfExtractor, TextPages};
pub use render::{write_summary, Converter, OfferDocument, SummaryWriter};
pub use stock::{
    extract_file, extract_records, ExtractionReport, GrammarParser, LocationPolicy,
    RecordExtractor, RecordParser,
};
