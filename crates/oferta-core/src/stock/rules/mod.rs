//! Rules for classifying report lines and converting field tokens.

pub mod classifier;
pub mod patterns;
pub mod price;
pub mod threshold;

pub use classifier::{is_noise, NoiseClassifier, NoiseReason};
pub use price::{format_report_price, parse_report_price};
pub use threshold::keep;
pub use patterns::*;
