//! Report sources: per-page text from the inventory export.

mod extractor;
mod text;

pub use extractor::PdfExtractor;
pub use text::TextPages;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::SourceError;
use crate::models::config::PdfConfig;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Trait for page-oriented report sources.
pub trait PageSource {
    /// Load the document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text of every page, in page order.
    fn pages(&self) -> Result<Vec<String>>;
}

/// Kind of report file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// PDF export (the default).
    Pdf,
    /// Plain text export, pages separated by form feeds.
    Text,
}

impl SourceKind {
    /// Pick the source kind for a path. Anything that is not `.txt` is read as PDF.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" => SourceKind::Text,
            _ => SourceKind::Pdf,
        }
    }
}

/// Read a report file and return the text of its pages.
pub fn load_pages(path: &Path, config: &PdfConfig) -> Result<Vec<String>> {
    let data = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let kind = SourceKind::from_path(path);
    debug!("Loading {} as {:?}", path.display(), kind);

    match kind {
        SourceKind::Pdf => {
            let mut extractor = PdfExtractor::new().with_pdf_extract(config.prefer_pdf_extract);
            extractor.load(&data)?;
            extractor.pages()
        }
        SourceKind::Text => {
            let mut source = TextPages::new();
            source.load(&data)?;
            source.pages()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("22112025.PDF")), SourceKind::Pdf);
        assert_eq!(SourceKind::from_path(Path::new("report.TXT")), SourceKind::Text);
        assert_eq!(SourceKind::from_path(Path::new("report")), SourceKind::Pdf);
    }

    #[test]
    fn test_load_pages_missing_file() {
        let result = load_pages(Path::new("does-not-exist.PDF"), &PdfConfig::default());
        assert!(matches!(result, Err(SourceError::Read { .. })));
    }

    #[test]
    fn test_load_pages_corrupt_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();

        let result = load_pages(&path, &PdfConfig::default());
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_load_pages_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, "page one\n\x0cpage two\n").unwrap();

        let pages = load_pages(&path, &PdfConfig::default()).unwrap();
        assert_eq!(pages, vec!["page one\n".to_string(), "page two\n".to_string()]);
    }
}
