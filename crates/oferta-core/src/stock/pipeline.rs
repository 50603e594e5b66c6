//! Extraction pipeline: pages → lines → classified lines → records.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, error, info, trace};

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, PdfConfig};
use crate::models::record::Record;
use crate::pdf::load_pages;

use super::parser::{GrammarParser, RecordParser, Rejection};
use super::rules::{keep, NoiseClassifier, NoiseReason};

/// What happened to a single report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Boilerplate, blank or separator. Never handed to the parser.
    Noise(NoiseReason),
    /// Candidate line that does not match the grammar.
    Rejected(Rejection),
    /// Parsed, but the quantity is not above the minimum.
    BelowThreshold(Record),
    /// Parsed and retained.
    Kept {
        record: Record,
        location_ambiguous: bool,
    },
}

/// A kept record whose location/brand split came from the tie-break policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// Page number (1-indexed).
    pub page: usize,
    /// Line number within the page (1-indexed).
    pub line: usize,
    /// The raw line.
    pub text: String,
    /// The record as extracted.
    pub record: Record,
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Retained records in encounter order.
    pub records: Vec<Record>,
    /// Number of pages processed.
    pub pages: usize,
    /// Lines skipped by the classifier.
    pub noise_lines: usize,
    /// Candidate lines that failed to parse.
    pub rejected_lines: usize,
    /// Parsed records dropped by the threshold.
    pub below_threshold: usize,
    /// Kept records to check by hand.
    pub review: Vec<ReviewItem>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionReport {
    /// Number of lines that reached the parser.
    pub fn candidate_lines(&self) -> usize {
        self.rejected_lines + self.below_threshold + self.records.len()
    }
}

/// Record extractor combining the classifier, a parser and the threshold.
pub struct RecordExtractor<P = GrammarParser> {
    parser: P,
    classifier: NoiseClassifier,
    minimum_quantity: i64,
}

impl RecordExtractor<GrammarParser> {
    /// Create an extractor with the default grammar parser.
    pub fn new(minimum_quantity: i64) -> Self {
        Self::with_parser(GrammarParser::new(), minimum_quantity)
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let parser = GrammarParser::new().with_location_policy(config.location_policy);
        Self::with_parser(parser, config.minimum_quantity)
    }
}

impl<P: RecordParser> RecordExtractor<P> {
    /// Create an extractor around a custom parser.
    pub fn with_parser(parser: P, minimum_quantity: i64) -> Self {
        Self {
            parser,
            classifier: NoiseClassifier::new(),
            minimum_quantity,
        }
    }

    /// The minimum quantity; records need strictly more to be kept.
    pub fn minimum_quantity(&self) -> i64 {
        self.minimum_quantity
    }

    /// Classify, parse and filter one line.
    pub fn process_line(&self, line: &str) -> LineOutcome {
        if let Some(reason) = self.classifier.classify(line) {
            return LineOutcome::Noise(reason);
        }

        match self.parser.parse_line(line) {
            Err(rejection) => LineOutcome::Rejected(rejection),
            Ok(parsed) if keep(&parsed.record, self.minimum_quantity) => LineOutcome::Kept {
                record: parsed.record,
                location_ambiguous: parsed.location_ambiguous,
            },
            Ok(parsed) => LineOutcome::BelowThreshold(parsed.record),
        }
    }

    /// Run the pipeline over page texts, in order.
    pub fn run<S: AsRef<str>>(&self, pages: &[S]) -> ExtractionReport {
        let start = Instant::now();
        let mut report = ExtractionReport::default();

        for (page_idx, page) in pages.iter().enumerate() {
            let kept_before = report.records.len();

            for (line_idx, line) in page.as_ref().lines().enumerate() {
                match self.process_line(line) {
                    LineOutcome::Noise(_) => report.noise_lines += 1,
                    LineOutcome::Rejected(rejection) => {
                        trace!("Rejected line {}:{} ({:?}): {}", page_idx + 1, line_idx + 1, rejection, line);
                        report.rejected_lines += 1;
                    }
                    LineOutcome::BelowThreshold(_) => report.below_threshold += 1,
                    LineOutcome::Kept { record, location_ambiguous } => {
                        if location_ambiguous {
                            debug!(
                                "Location split decided by policy at {}:{}: location={:?} brand={:?}",
                                page_idx + 1,
                                line_idx + 1,
                                record.location,
                                record.brand
                            );
                            report.review.push(ReviewItem {
                                page: page_idx + 1,
                                line: line_idx + 1,
                                text: line.trim().to_string(),
                                record: record.clone(),
                            });
                        }
                        report.records.push(record);
                    }
                }
            }

            report.pages += 1;
            debug!(
                "Page {} processed: {} records kept",
                page_idx + 1,
                report.records.len() - kept_before
            );
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extracted {} records with quantity > {} from {} pages ({} noise, {} rejected, {} below threshold)",
            report.records.len(),
            self.minimum_quantity,
            report.pages,
            report.noise_lines,
            report.rejected_lines,
            report.below_threshold
        );
        if !report.review.is_empty() {
            info!(
                "{} records had their location chosen by the tie-break policy",
                report.review.len()
            );
        }

        report
    }

    /// Load a report file and run the pipeline over its pages.
    ///
    /// A source that cannot be opened or read is reported once here and
    /// returned as [`ExtractionError::SourceUnavailable`].
    pub fn run_file(&self, path: &Path, pdf: &PdfConfig) -> Result<ExtractionReport, ExtractionError> {
        let pages = load_pages(path, pdf).map_err(|e| {
            error!("Cannot read report {}: {}", path.display(), e);
            ExtractionError::SourceUnavailable(e)
        })?;

        debug!("Processing {} pages from {}", pages.len(), path.display());
        Ok(self.run(&pages))
    }
}

/// Extract the records of `pages` whose quantity is above `minimum_quantity`.
pub fn extract_records<S: AsRef<str>>(pages: &[S], minimum_quantity: i64) -> Vec<Record> {
    RecordExtractor::new(minimum_quantity).run(pages).records
}

/// Extract records from a report file with default settings.
pub fn extract_file(path: &Path, minimum_quantity: i64) -> Result<ExtractionReport, ExtractionError> {
    RecordExtractor::new(minimum_quantity).run_file(path, &PdfConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Unit;
    use crate::stock::parser::ParsedLine;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::cell::RefCell;
    use std::str::FromStr;

    const SAMPLE: &str = "9576 577508 ABS S.LIVRE ADAP C/A 48X8UN L8P7 955 CX SEMPRELIVRE 118,00";

    const PAGE_ONE: &str = "\
TARUMA COMERCIAL LTDA
Emitido em 22/11/2025 07:31
Código Número Descrição Estoque Unid Local Marca Preço
------------------------------------------------------------------
9576 577508 ABS S.LIVRE ADAP C/A 48X8UN L8P7 955 CX SEMPRELIVRE 118,00
1755 100200 ACUCAR ITAMARATY 30X1KG 449 FD A12 ITAMARATY 98,00
2001 300400 BISCOITO MAIZENA 5 CX VITARELLA 45,90
2002 300401 BISCOITO RECHEADO -7 CX VITARELLA 52,10
TOTAL GERAL 1402

Pagina 1 de 2";

    const PAGE_TWO: &str = "\
Código Número Descrição Estoque Unid Local Marca Preço
3100 900001 DETERGENTE YPE 500ML 24X1 60 CX YPE 55,00
3101 900002 ESPONJA DUPLA FACE 12 UN SCOTCH 3,99
3102 900003 SABAO EM PO 1KG 8 FD OMO 12,34,56
Pagina 2 de 2";

    /// Parser that records every line it is asked to parse.
    struct RecordingParser {
        inner: GrammarParser,
        seen: RefCell<Vec<String>>,
    }

    impl RecordParser for RecordingParser {
        fn parse_line(&self, line: &str) -> Result<ParsedLine, Rejection> {
            self.seen.borrow_mut().push(line.to_string());
            self.inner.parse_line(line)
        }
    }

    #[test]
    fn test_sample_line_end_to_end() {
        let records = extract_records(&[SAMPLE], 5);
        assert_eq!(
            records,
            vec![Record {
                code: "9576".to_string(),
                serial: "577508".to_string(),
                description: "ABS S.LIVRE ADAP C/A 48X8UN L8P7".to_string(),
                quantity: 955,
                unit: Unit::Box,
                location: String::new(),
                brand: "SEMPRELIVRE".to_string(),
                price: Decimal::from_str("118.00").unwrap(),
            }]
        );
    }

    #[test]
    fn test_sample_line_at_or_above_quantity() {
        assert!(extract_records(&[SAMPLE], 955).is_empty());
        assert!(extract_records(&[SAMPLE], 10_000).is_empty());
        assert_eq!(extract_records(&[SAMPLE], 954).len(), 1);
    }

    #[test]
    fn test_separator_line_is_never_parsed() {
        let line = format!("{} -----", SAMPLE);
        let extractor = RecordExtractor::with_parser(
            RecordingParser {
                inner: GrammarParser::new(),
                seen: RefCell::new(Vec::new()),
            },
            5,
        );

        let report = extractor.run(&[line.as_str()]);
        assert!(report.records.is_empty());
        assert_eq!(report.noise_lines, 1);
        assert!(extractor.parser.seen.borrow().is_empty());
    }

    #[test]
    fn test_noise_lines_never_reach_parser() {
        let extractor = RecordExtractor::with_parser(
            RecordingParser {
                inner: GrammarParser::new(),
                seen: RefCell::new(Vec::new()),
            },
            5,
        );

        let report = extractor.run(&[PAGE_ONE, PAGE_TWO]);

        let classifier = NoiseClassifier::new();
        let seen = extractor.parser.seen.borrow();
        assert!(seen.iter().all(|line| !classifier.is_noise(line)));
        assert_eq!(seen.len(), report.candidate_lines());
    }

    #[test]
    fn test_report_counts_and_order() {
        let report = RecordExtractor::new(5).run(&[PAGE_ONE, PAGE_TWO]);

        let codes: Vec<&str> = report.records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["9576", "1755", "3100", "3101"]);

        assert_eq!(report.pages, 2);
        // 2001 (exactly 5) and 2002 (negative)
        assert_eq!(report.below_threshold, 2);
        // "TOTAL GERAL 1402" and the malformed price line
        assert_eq!(report.rejected_lines, 2);
        // page one: 4 header lines, blank, footer; page two: header, footer
        assert_eq!(report.noise_lines, 8);
    }

    #[test]
    fn test_review_items_for_policy_decided_splits() {
        let report = RecordExtractor::new(5).run(&[PAGE_ONE, PAGE_TWO]);

        assert_eq!(report.review.len(), 1);
        let item = &report.review[0];
        assert_eq!((item.page, item.line), (1, 6));
        assert_eq!(item.record.location, "A12");
        assert_eq!(item.record.brand, "ITAMARATY");
    }

    #[test]
    fn test_negative_quantities_parse_but_are_filtered() {
        let extractor = RecordExtractor::new(0);
        match extractor.process_line("2002 300401 BISCOITO RECHEADO -7 CX VITARELLA 52,10") {
            LineOutcome::BelowThreshold(record) => assert_eq!(record.quantity, -7),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let all = extract_records(&[PAGE_ONE], i64::MIN);
        assert!(all.iter().any(|r| r.quantity < 0));
    }

    #[test]
    fn test_idempotent() {
        let pages = [PAGE_ONE, PAGE_TWO];
        assert_eq!(extract_records(&pages, 5), extract_records(&pages, 5));
    }

    #[test]
    fn test_raising_minimum_never_grows_result() {
        let pages = [PAGE_ONE, PAGE_TWO];
        let mut previous = usize::MAX;
        for minimum in [-10, 0, 5, 11, 12, 59, 60, 448, 449, 955, 1000] {
            let count = extract_records(&pages, minimum).len();
            assert!(count <= previous, "minimum {} kept {}", minimum, count);
            previous = count;
        }
    }

    #[test]
    fn test_repeated_lines_are_not_deduplicated() {
        let page = format!("{}\n{}", SAMPLE, SAMPLE);
        assert_eq!(extract_records(&[page], 5).len(), 2);
    }

    #[test]
    fn test_missing_source_is_unavailable() {
        let result = extract_file(Path::new("no-such-report.PDF"), 5);
        assert!(matches!(result, Err(ExtractionError::SourceUnavailable(_))));
    }

    #[test]
    fn test_text_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("22112025.txt");
        std::fs::write(&path, format!("{}\x0c{}", PAGE_ONE, PAGE_TWO)).unwrap();

        let report = extract_file(&path, 5).unwrap();
        assert_eq!(report.pages, 2);
        assert_eq!(report.records.len(), 4);
    }
}
