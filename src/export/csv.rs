//! CSV export.
//!
//! One header row, then one row per record with the same columns as the
//! JSON export. The price history is embedded as a JSON array cell.

use super::ExportRecord;
use crate::error::{ExportErrorKind, PriceListError};

const HEADER: [&str; 12] = [
    "store",
    "id",
    "name",
    "category",
    "price",
    "priceHistory",
    "isWeighted",
    "unit",
    "quantity",
    "organic",
    "available",
    "url",
];

/// CSV text for `records`.
pub fn to_csv(records: &[ExportRecord]) -> crate::Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(csv_error)?;

    for record in records {
        let history = serde_json::to_string(&record.price_history)
            .map_err(|e| PriceListError::export("items.csv", ExportErrorKind::Json(e.to_string())))?;
        writer
            .write_record([
                record.store.as_str(),
                record.id.as_str(),
                record.name.as_str(),
                record.category.as_deref().unwrap_or(""),
                &record.price.to_string(),
                &history,
                &record.is_weighted.to_string(),
                record.unit.as_deref().unwrap_or(""),
                &record.quantity.as_ref().map(ToString::to_string).unwrap_or_default(),
                &record.organic.to_string(),
                &record.available.to_string(),
                record.url.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PriceListError::export("items.csv", ExportErrorKind::Csv(e.to_string())))?;
    String::from_utf8(bytes)
        .map_err(|e| PriceListError::export("items.csv", ExportErrorKind::Csv(e.to_string())))
}

fn csv_error(e: ::csv::Error) -> PriceListError {
    PriceListError::export("items.csv", ExportErrorKind::Csv(e.to_string()))
}
