//! Product and price history types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A priced retail product as delivered by a store feed.
///
/// Field names follow the camelCase layout of the feed JSON. `chart` is
/// view-session state and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store identifier (e.g. "billa", "spar")
    pub store: String,
    /// Store-local product id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Stable id unique across stores; filled from `store` and `id` when absent
    #[serde(default)]
    pub unique_id: String,
    /// Display name
    pub name: String,
    /// Catalog category code
    #[serde(default)]
    pub category: Option<String>,
    /// Current sales price
    pub price: f64,
    /// Price per reference unit (kg, l or piece)
    #[serde(default)]
    pub unit_price: f64,
    /// Unit of measure: "g", "ml", "stk" or anything else the store uses
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: Option<Quantity>,
    #[serde(default)]
    pub is_weighted: bool,
    #[serde(default)]
    pub is_organic: bool,
    #[serde(default)]
    pub unavailable: bool,
    /// Price history, newest first. `price_history[0]` is the current price.
    pub price_history: Vec<PriceEntry>,
    /// Marked for charting
    #[serde(skip)]
    pub chart: bool,
}

/// One dated price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub date: NaiveDate,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

/// Package quantity: numeric for measured goods, free text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Amount(f64),
    Label(String),
}

impl Quantity {
    /// Numeric amount, if this quantity has one.
    #[must_use]
    pub const fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(value) => Some(*value),
            Self::Label(_) => None,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(value) => write!(f, "{value}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl Product {
    /// Create a product with a single history entry at `price`.
    pub fn new(
        store: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        let store = store.into();
        let id = id.into();
        let unique_id = default_unique_id(&store, &id);
        Self {
            store,
            id,
            unique_id,
            name: name.into(),
            category: None,
            price,
            unit_price: price,
            unit: None,
            quantity: None,
            is_weighted: false,
            is_organic: false,
            unavailable: false,
            price_history: vec![PriceEntry {
                date: NaiveDate::default(),
                price,
                unit_price: None,
            }],
            chart: false,
        }
    }

    /// Set unit and numeric quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = Some(Quantity::Amount(quantity));
        self.unit = Some(unit.into());
        self
    }

    /// Set a free-text quantity (no unit).
    #[must_use]
    pub fn with_quantity_label(mut self, label: impl Into<String>) -> Self {
        self.quantity = Some(Quantity::Label(label.into()));
        self
    }

    #[must_use]
    pub const fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the price history. Prices are newest first and dated one day
    /// apart, ending at the epoch; the current price follows the first entry.
    #[must_use]
    pub fn with_history(mut self, prices: &[f64]) -> Self {
        if prices.is_empty() {
            return self;
        }
        let newest = NaiveDate::default() + chrono::Days::new(prices.len() as u64 - 1);
        self.price_history = prices
            .iter()
            .enumerate()
            .map(|(age, &price)| PriceEntry {
                date: newest - chrono::Days::new(age as u64),
                price,
                unit_price: None,
            })
            .collect();
        self.price = prices[0];
        self
    }

    #[must_use]
    pub const fn weighted(mut self) -> Self {
        self.is_weighted = true;
        self
    }

    #[must_use]
    pub const fn organic(mut self) -> Self {
        self.is_organic = true;
        self
    }

    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Current price according to the history, falling back to `price`.
    #[must_use]
    pub fn current_price(&self) -> f64 {
        self.price_history.first().map_or(self.price, |entry| entry.price)
    }

    /// The entry before the current one, if the history has one.
    #[must_use]
    pub fn previous_price(&self) -> Option<f64> {
        self.price_history.get(1).map(|entry| entry.price)
    }

    /// Availability as exported (inverse of `unavailable`).
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.unavailable
    }

    /// Unit string used for comparisons, empty when absent.
    #[must_use]
    pub fn unit_str(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }

    /// Fill `unique_id` from store and id if the feed omitted it.
    pub fn ensure_unique_id(&mut self) {
        if self.unique_id.is_empty() {
            self.unique_id = default_unique_id(&self.store, &self.id);
        }
    }
}

fn default_unique_id(store: &str, id: &str) -> String {
    format!("{store}-{id}")
}

/// Store feeds use both numeric and string product ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
