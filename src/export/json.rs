//! JSON export.

use super::ExportRecord;
use crate::error::{ExportErrorKind, PriceListError};

/// Pretty-printed JSON array of records.
pub fn to_json(records: &[ExportRecord]) -> crate::Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| PriceListError::export("items.json", ExportErrorKind::Json(e.to_string())))
}
