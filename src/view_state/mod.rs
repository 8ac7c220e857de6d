//! Serializable snapshot of the list's user-configurable settings.
//!
//! A [`ViewState`] is captured from the live list, handed to whoever wants
//! to persist or share it, and later restored in one step. It never holds
//! product references, only unique ids, so it can travel through a URL query
//! parameter or a command-line flag.
//!
//! The JSON layout keeps the field names of the web price list so links
//! shared from it still restore (`pricesExpaned` included).

mod source;

pub use source::{QueryString, StateSource};

use crate::analytics::PriceMode;
use crate::sorting::SortMode;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the list's observable configuration.
///
/// Missing fields take their [`Default`] values, so partial states restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Sales price (`true`) or unit price (`false`)
    #[serde(rename = "salesPrice")]
    pub sales_price: bool,
    #[serde(rename = "sortType")]
    pub sort_mode: SortMode,
    /// Chart panel visible
    #[serde(rename = "showChart")]
    pub show_chart: bool,
    /// Price histories expanded
    #[serde(rename = "pricesExpaned", alias = "pricesExpanded")]
    pub prices_expanded: bool,
    /// Opaque state owned by the chart panel
    #[serde(rename = "chartState")]
    pub chart_state: serde_json::Value,
    /// Unique ids of the products marked for charting, in list order
    #[serde(rename = "itemsToChart")]
    pub items_to_chart: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sales_price: true,
            sort_mode: SortMode::default(),
            show_chart: false,
            prices_expanded: false,
            chart_state: serde_json::Value::Null,
            items_to_chart: Vec::new(),
        }
    }
}

impl ViewState {
    #[must_use]
    pub const fn price_mode(&self) -> PriceMode {
        PriceMode::from_sales_flag(self.sales_price)
    }

    /// Serialize for a query parameter or command-line flag.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        // A struct of plain fields and a JSON value always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a serialized state. Malformed input yields `None`.
    #[must_use]
    pub fn from_query_value(value: &str) -> Option<Self> {
        match serde_json::from_str::<Option<Self>>(value) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring malformed view state: {e}");
                None
            }
        }
    }

    /// Read the state stored under `key`, if present and well-formed.
    #[must_use]
    pub fn read_from(source: &dyn StateSource, key: &str) -> Option<Self> {
        let Some(raw) = source.lookup(key) else {
            tracing::debug!("No view state stored under '{key}'");
            return None;
        };
        Self::from_query_value(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> ViewState {
        ViewState {
            sales_price: false,
            sort_mode: SortMode::QuantityDesc,
            show_chart: true,
            prices_expanded: true,
            chart_state: serde_json::json!({"sumStores": true}),
            items_to_chart: vec!["billa-1".into(), "spar-2".into()],
        }
    }

    #[test]
    fn test_query_value_round_trip() {
        let state = sample();
        let encoded = state.to_query_value();
        assert_eq!(ViewState::from_query_value(&encoded), Some(state));
    }

    #[test]
    fn test_wire_field_names() {
        let encoded = sample().to_query_value();
        for field in ["salesPrice", "sortType", "showChart", "pricesExpaned", "chartState", "itemsToChart"] {
            assert!(encoded.contains(field), "missing {field} in {encoded}");
        }
        assert!(encoded.contains("\"quantity-desc\""));
    }

    #[test]
    fn test_accepts_corrected_spelling_and_missing_optionals() {
        let raw = r#"{"salesPrice":true,"sortType":"similar","showChart":false,"pricesExpanded":true}"#;
        let state = ViewState::from_query_value(raw).unwrap();
        assert_eq!(state.sort_mode, SortMode::Similarity);
        assert!(state.prices_expanded);
        assert!(state.items_to_chart.is_empty());
        assert_eq!(state.chart_state, serde_json::Value::Null);
    }

    #[test]
    fn test_partial_state_uses_defaults() {
        let state = ViewState::from_query_value(r#"{"sortType":"price-desc"}"#).unwrap();
        assert_eq!(state.sort_mode, SortMode::PriceDesc);
        assert!(state.sales_price);
        assert!(!state.show_chart);
    }

    #[test]
    fn test_malformed_values_are_none() {
        assert_eq!(ViewState::from_query_value("not json"), None);
        assert_eq!(ViewState::from_query_value("null"), None);
        assert_eq!(ViewState::from_query_value(r#"{"salesPrice":"yes"}"#), None);
        assert_eq!(ViewState::from_query_value(r#"{"sortType":"cheapest"}"#), None);
    }

    #[test]
    fn test_read_from_source() {
        let mut slots = HashMap::new();
        slots.insert("items".to_string(), sample().to_query_value());

        assert_eq!(ViewState::read_from(&slots, "items"), Some(sample()));
        assert_eq!(ViewState::read_from(&slots, "other"), None);
    }

    #[test]
    fn test_price_mode() {
        assert_eq!(sample().price_mode(), PriceMode::Unit);
        assert_eq!(ViewState::default().price_mode(), PriceMode::Sales);
    }
}
