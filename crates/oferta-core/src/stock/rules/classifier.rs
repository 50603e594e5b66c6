//! Noise line detection: headers, separators, footers and blanks.

use super::patterns::{NOISE_MARKERS, SEPARATOR};

/// Why a line was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// Empty or whitespace only.
    Blank,
    /// Contains a run of five dashes.
    Separator,
    /// Contains one of the boilerplate markers.
    Marker(&'static str),
}

/// Line classifier for the inventory report.
#[derive(Debug, Clone)]
pub struct NoiseClassifier {
    markers: Vec<&'static str>,
}

impl NoiseClassifier {
    /// Create a classifier with the report's boilerplate markers.
    pub fn new() -> Self {
        Self {
            markers: NOISE_MARKERS.to_vec(),
        }
    }

    /// Classify a raw line. `None` means the line is a parse candidate.
    pub fn classify(&self, line: &str) -> Option<NoiseReason> {
        if line.trim().is_empty() {
            return Some(NoiseReason::Blank);
        }

        if SEPARATOR.is_match(line) {
            return Some(NoiseReason::Separator);
        }

        self.markers
            .iter()
            .copied()
            .find(|marker| line.contains(marker))
            .map(NoiseReason::Marker)
    }

    /// Check whether a line is noise.
    pub fn is_noise(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }
}

impl Default for NoiseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a report line is noise (never a record).
pub fn is_noise(line: &str) -> bool {
    NoiseClassifier::new().is_noise(line)
}
