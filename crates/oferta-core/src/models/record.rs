//! Stock record extracted from one line of the inventory report.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stock::rules::format_report_price;

/// A single product line of the daily inventory report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Internal product code (digits only).
    pub code: String,

    /// Product number as printed in the report.
    pub serial: String,

    /// Product description, internal spacing preserved.
    pub description: String,

    /// Units in stock. Negative values do occur in the export.
    pub quantity: i64,

    /// Unit of the quantity.
    pub unit: Unit,

    /// Storage location, empty when the column is blank.
    #[serde(default)]
    pub location: String,

    /// Brand name.
    pub brand: String,

    /// Unit price, dot-decimal.
    pub price: Decimal,
}

impl Record {
    /// Format the record the way the report prints it.
    ///
    /// Parsing the returned line yields an equal record as long as the
    /// brand is a single word whenever the location is empty.
    pub fn to_report_line(&self) -> String {
        let mut fields = vec![
            self.code.clone(),
            self.serial.clone(),
            self.description.clone(),
            self.quantity.to_string(),
            self.unit.code().to_string(),
        ];
        if !self.location.is_empty() {
            fields.push(self.location.clone());
        }
        fields.push(self.brand.clone());
        fields.push(format_report_price(self.price));
        fields.join(" ")
    }
}

/// Unit codes used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Box (caixa).
    #[serde(rename = "CX")]
    Box,
    /// Bundle (fardo).
    #[serde(rename = "FD")]
    Bundle,
    /// Single unit (unidade).
    #[serde(rename = "UN")]
    Each,
}

impl Unit {
    /// All known unit codes.
    pub const ALL: [Unit; 3] = [Unit::Box, Unit::Bundle, Unit::Each];

    /// Parse a unit token. Matching is exact and case-sensitive.
    pub fn from_code(token: &str) -> Option<Self> {
        match token {
            "CX" => Some(Unit::Box),
            "FD" => Some(Unit::Bundle),
            "UN" => Some(Unit::Each),
            _ => None,
        }
    }

    /// The code as printed in the report.
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Box => "CX",
            Unit::Bundle => "FD",
            Unit::Each => "UN",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
