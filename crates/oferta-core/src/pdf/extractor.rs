//! PDF page text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use super::{PageSource, Result};
use crate::error::SourceError;

/// PDF page text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    use_pdf_extract: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            use_pdf_extract: true,
        }
    }

    /// Choose whether pdf-extract is tried before lopdf's own text extraction.
    pub fn with_pdf_extract(mut self, enabled: bool) -> Self {
        self.use_pdf_extract = enabled;
        self
    }

    /// Extract text from a specific page (1-indexed) with lopdf.
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(SourceError::Parse("No document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(SourceError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| SourceError::TextExtraction(e.to_string()))
    }

    fn pages_with_lopdf(&self) -> Result<Vec<String>> {
        (1..=self.page_count())
            .map(|page| self.extract_page_text(page))
            .collect()
    }

    /// pdf-extract panics on some malformed documents (e.g. a font the page
    /// resources never declare), so the panic is turned into an error here.
    fn pages_with_pdf_extract(&self) -> Result<Vec<String>> {
        let data = &self.raw_data;
        match panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        })) {
            Ok(result) => result.map_err(|e| SourceError::TextExtraction(e.to_string())),
            Err(payload) => Err(SourceError::TextExtraction(format!(
                "pdf-extract panicked: {}",
                panic_message(&*payload)
            ))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| SourceError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(SourceError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the raw bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| SourceError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(SourceError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn pages(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(SourceError::Parse("No document loaded".to_string()));
        }

        if self.use_pdf_extract {
            match self.pages_with_pdf_extract() {
                Ok(pages) if pages.len() == self.page_count() as usize => return Ok(pages),
                Ok(pages) => warn!(
                    "pdf-extract returned {} pages for a {} page document, using lopdf",
                    pages.len(),
                    self.page_count()
                ),
                Err(e) => warn!("pdf-extract failed ({}), using lopdf", e),
            }
        }

        self.pages_with_lopdf()
    }
}
