//! Plain text report exports.

use tracing::debug;

use super::{PageSource, Result};
use crate::error::SourceError;

const FORM_FEED: char = '\x0c';

/// Text export where pages are separated by form feed characters.
#[derive(Debug, Default)]
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    /// Create an empty text source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from already decoded text.
    pub fn from_text(text: &str) -> Self {
        Self {
            pages: text.split(FORM_FEED).map(str::to_string).collect(),
        }
    }
}

impl PageSource for TextPages {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(data);
        if text.trim().is_empty() {
            return Err(SourceError::NoPages);
        }

        *self = Self::from_text(&text);
        debug!("Loaded text report with {} pages", self.pages.len());
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn pages(&self) -> Result<Vec<String>> {
        Ok(self.pages.clone())
    }
}
