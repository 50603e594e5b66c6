//! Plain-text summary of the filtered records.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::models::record::Record;

const RULE_WIDTH: usize = 80;

/// Writer for the numbered record summary.
#[derive(Debug, Clone, Default)]
pub struct SummaryWriter {
    minimum_quantity: Option<i64>,
}

impl SummaryWriter {
    /// Create a summary writer with a generic title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mention the stock threshold in the title.
    pub fn with_minimum(mut self, minimum_quantity: i64) -> Self {
        self.minimum_quantity = Some(minimum_quantity);
        self
    }

    /// Render the summary text.
    pub fn render(&self, records: &[Record]) -> String {
        let mut output = String::new();

        match self.minimum_quantity {
            Some(minimum) => output.push_str(&format!("PRODUTOS COM ESTOQUE > {} CAIXAS\n", minimum)),
            None => output.push_str("PRODUTOS FILTRADOS\n"),
        }
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        for (i, record) in records.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, record.description));
            output.push_str(&format!(
                "   Codigo: {} | Estoque: {} {} | Preco: R$ {:.2}\n",
                record.code, record.quantity, record.unit, record.price
            ));
            output.push_str(&format!("   Marca: {}\n\n", record.brand));
        }

        output
    }

    /// Write the summary to `destination`, creating parent directories.
    pub fn write(&self, records: &[Record], destination: &Path) -> Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(destination, self.render(records))?;
        info!("Summary of {} records written to {}", records.len(), destination.display());

        Ok(destination.to_path_buf())
    }
}

/// Write the record summary to `destination` and return its path.
pub fn write_summary(records: &[Record], destination: &Path) -> Result<PathBuf> {
    SummaryWriter::new().write(records, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Unit;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample_records() -> Vec<Record> {
        vec![
            Record {
                code: "9576".to_string(),
                serial: "577508".to_string(),
                description: "ABS S.LIVRE ADAP C/A 48X8UN L8P7".to_string(),
                quantity: 955,
                unit: Unit::Box,
                location: String::new(),
                brand: "SEMPRELIVRE".to_string(),
                price: Decimal::from_str("118").unwrap(),
            },
            Record {
                code: "1755".to_string(),
                serial: "100200".to_string(),
                description: "ACUCAR ITAMARATY 30X1KG".to_string(),
                quantity: 449,
                unit: Unit::Bundle,
                location: "A12".to_string(),
                brand: "ITAMARATY".to_string(),
                price: Decimal::from_str("98.5").unwrap(),
            },
        ]
    }

    #[test]
    fn test_render_layout() {
        let text = SummaryWriter::new().with_minimum(5).render(&sample_records());
        let expected = format!(
            "PRODUTOS COM ESTOQUE > 5 CAIXAS\n{}\n\n\
             1. ABS S.LIVRE ADAP C/A 48X8UN L8P7\n\
             \x20  Codigo: 9576 | Estoque: 955 CX | Preco: R$ 118.00\n\
             \x20  Marca: SEMPRELIVRE\n\n\
             2. ACUCAR ITAMARATY 30X1KG\n\
             \x20  Codigo: 1755 | Estoque: 449 FD | Preco: R$ 98.50\n\
             \x20  Marca: ITAMARATY\n\n",
            "=".repeat(80)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty() {
        let text = SummaryWriter::new().render(&[]);
        assert_eq!(text, format!("PRODUTOS FILTRADOS\n{}\n\n", "=".repeat(80)));
    }

    #[test]
    fn test_write_summary_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("output").join("produtos_filtrados.txt");

        let written = write_summary(&sample_records(), &destination).unwrap();
        assert_eq!(written, destination);

        let content = fs::read_to_string(&destination).unwrap();
        assert!(content.contains("1. ABS S.LIVRE ADAP C/A 48X8UN L8P7"));
        assert!(content.contains("   Marca: ITAMARATY"));
    }
}
