//! Offer document: records copied into a template table, validity date patched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use html_escape::encode_text;
use tracing::{debug, info};

use crate::error::{RenderError, Result};
use crate::models::record::Record;

/// Placeholder replaced with the validity date (dd/mm/YYYY).
pub const VALID_UNTIL: &str = "{{valid_until}}";
/// Placeholder replaced with one table row per record.
pub const ROWS: &str = "{{rows}}";
/// Placeholder replaced with the number of records.
pub const TOTAL: &str = "{{total}}";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>OFERTA DO DIA</title>
<style>
  body { font-family: Arial, sans-serif; margin: 2em; }
  h1, .validity { text-align: center; }
  .validity { font-weight: bold; font-size: 14pt; }
  table { width: 100%; border-collapse: collapse; }
  th, td { border: 1px solid #444; padding: 4px 8px; }
  td.number { text-align: right; }
</style>
</head>
<body>
<h1>OFERTA DO DIA</h1>
<p class="validity">Válido para: {{valid_until}}</p>
<h2>Produtos Disponíveis</h2>
<table>
<thead>
<tr><th>Código</th><th>Descrição</th><th>Estoque</th><th>Preço</th></tr>
</thead>
<tbody>
{{rows}}
</tbody>
</table>
<p>Total de produtos: {{total}}</p>
</body>
</html>
"#;

/// Offer document renderer.
#[derive(Debug, Clone)]
pub struct OfferDocument {
    valid_until: NaiveDate,
    template: String,
}

impl OfferDocument {
    /// Create a document using the built-in template.
    pub fn new(valid_until: NaiveDate) -> Self {
        Self {
            valid_until,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Use a custom template. It must contain the rows placeholder.
    pub fn with_template(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(ROWS) {
            return Err(RenderError::Template(format!("missing {} placeholder", ROWS)).into());
        }
        if !template.contains(VALID_UNTIL) {
            debug!("Template has no {} placeholder, validity date not patched", VALID_UNTIL);
        }
        self.template = template;
        Ok(self)
    }

    /// Load the template at `path`, keeping the built-in one if the file does not exist.
    pub fn with_template_file(self, path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Template {} not found, using the built-in template", path.display());
            return Ok(self);
        }

        let template = fs::read_to_string(path)?;
        debug!("Loaded template {}", path.display());
        self.with_template(template)
    }

    /// Render the document for the given records, in order.
    pub fn render(&self, records: &[Record]) -> String {
        let rows: Vec<String> = records.iter().map(render_row).collect();

        self.template
            .replace(VALID_UNTIL, &self.valid_until.format("%d/%m/%Y").to_string())
            .replace(TOTAL, &records.len().to_string())
            .replace(ROWS, &rows.join("\n"))
    }

    /// Render and write the document, creating parent directories.
    pub fn write(&self, records: &[Record], destination: &Path) -> Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(destination, self.render(records))?;
        info!("{} records added to {}", records.len(), destination.display());

        Ok(destination.to_path_buf())
    }
}

fn render_row(record: &Record) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td class=\"number\">{} {}</td><td class=\"number\">R$ {:.2}</td></tr>",
        encode_text(&record.code),
        encode_text(&record.description),
        record.quantity,
        record.unit,
        record.price
    )
}
