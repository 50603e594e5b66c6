//! Stock threshold filter.

use crate::models::record::Record;

/// Keep a record only when its quantity is strictly above `minimum`.
pub fn keep(record: &Record, minimum: i64) -> bool {
    record.quantity > minimum
}
