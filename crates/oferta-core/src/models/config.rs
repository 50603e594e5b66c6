//! Configuration structures for the offer pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{OfertaError, Result};
use crate::stock::LocationPolicy;

/// Main configuration for the oferta pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfertaConfig {
    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output file locations.
    pub output: OutputConfig,

    /// External document converter.
    pub converter: ConverterConfig,
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Records are kept only when their quantity is strictly above this.
    pub minimum_quantity: i64,

    /// How to split the tokens between unit and brand.
    pub location_policy: LocationPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            minimum_quantity: 5,
            location_policy: LocationPolicy::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Use pdf-extract for page text, falling back to lopdf.
    /// When false only lopdf is used.
    pub prefer_pdf_extract: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            prefer_pdf_extract: true,
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving every generated file.
    pub output_dir: PathBuf,

    /// Summary text file name.
    pub summary_file: String,

    /// Offer document file name.
    pub document_file: String,

    /// Offer document template. The built-in template is used when missing.
    pub template: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            summary_file: "produtos_filtrados.txt".to_string(),
            document_file: "OFERTA-DO-DIA.html".to_string(),
            template: PathBuf::from("OFERTA-DO-DIA.html"),
        }
    }
}

/// External converter producing the fixed-layout offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Program to run.
    pub program: String,

    /// Arguments placed before the input and output paths.
    pub args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "wkhtmltopdf".to_string(),
            args: Vec::new(),
        }
    }
}

impl OfertaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| OfertaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| OfertaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of the summary text file.
    pub fn summary_path(&self) -> PathBuf {
        self.output.output_dir.join(&self.output.summary_file)
    }

    /// Path of the rendered offer document.
    pub fn document_path(&self) -> PathBuf {
        self.output.output_dir.join(&self.output.document_file)
    }
}
