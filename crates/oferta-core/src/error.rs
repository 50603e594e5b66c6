//! Error types for the oferta-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the oferta library.
#[derive(Error, Debug)]
pub enum OfertaError {
    /// Report source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Document rendering or conversion error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading the inventory report.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The report file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document is empty or has no pages.
    #[error("document has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors surfaced by the extraction pipeline.
///
/// Per-line problems never show up here; a malformed line is dropped and
/// counted in the report instead.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input source could not be opened or read at all.
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Errors related to the offer document and its conversion.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The document to convert does not exist.
    #[error("input document not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The template could not be used.
    #[error("invalid template: {0}")]
    Template(String),

    /// The external converter failed.
    #[error("converter `{program}` failed: {reason}")]
    Converter { program: String, reason: String },
}

/// Result type for the oferta library.
pub type Result<T> = std::result::Result<T, OfertaError>;
