//! Export of the listed products as JSON or CSV.
//!
//! Products are first reduced to [`ExportRecord`]s (the public subset of a
//! product plus its store URL), then serialized and handed to an
//! [`ExportSink`] under a fixed file name.

mod csv;
mod json;
mod sink;

pub use self::csv::to_csv;
pub use json::to_json;
pub use sink::{DirectorySink, ExportSink, MemorySink};

use crate::model::{PriceEntry, Product, Quantity};
use crate::stores::StoreRegistry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Export file format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// Comma-separated values with a header row
    Csv,
}

impl ExportFormat {
    /// File name the export is delivered under.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Json => "items.json",
            Self::Csv => "items.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// One exported product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub store: String,
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
    pub price_history: Vec<PriceEntry>,
    pub is_weighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    pub organic: bool,
    pub available: bool,
    pub url: String,
}

impl ExportRecord {
    #[must_use]
    pub fn from_product(product: &Product, stores: &dyn StoreRegistry) -> Self {
        Self {
            store: product.store.clone(),
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            price_history: product.price_history.clone(),
            is_weighted: product.is_weighted,
            unit: product.unit.clone(),
            quantity: product.quantity.clone(),
            organic: product.is_organic,
            available: product.is_available(),
            url: stores.url_for(product),
        }
    }
}

/// Records for every product, in collection order.
#[must_use]
pub fn export_records(products: &[Product], stores: &dyn StoreRegistry) -> Vec<ExportRecord> {
    products
        .iter()
        .map(|product| ExportRecord::from_product(product, stores))
        .collect()
}

/// Serialize `records` in `format`.
pub fn render(records: &[ExportRecord], format: ExportFormat) -> crate::Result<String> {
    match format {
        ExportFormat::Json => to_json(records),
        ExportFormat::Csv => to_csv(records),
    }
}
