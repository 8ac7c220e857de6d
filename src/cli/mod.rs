//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler loads a product file into an [`ItemsList`] configured from
//! [`AppConfig`], optionally restoring a shared view state first.

mod export;
mod sort;
mod view;

pub use export::{ExportTarget, run_export};
pub use sort::{SortRequest, format_table, run_sort};
pub use view::run_view;

use crate::config::AppConfig;
use crate::i18n;
use crate::list::ItemsList;
use crate::model::load_products;
use crate::view_state::QueryString;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Product file plus an optional shared view state.
#[derive(Debug, Clone, Default)]
pub struct ListSource {
    /// JSON product file
    pub input: PathBuf,
    /// Query string (`items=...`) or bare view-state JSON
    pub state: Option<String>,
}

impl ListSource {
    /// State parameters keyed for the list `instance_id`.
    #[must_use]
    pub fn query(&self, instance_id: &str) -> QueryString {
        match self.state.as_deref().map(str::trim) {
            Some(state) if state.starts_with('{') => {
                let mut query = QueryString::default();
                query.set(instance_id, state);
                query
            }
            Some(state) => QueryString::parse(state),
            None => QueryString::default(),
        }
    }
}

/// Empty list wired to the configured translator and stores.
#[must_use]
pub fn build_list(config: &AppConfig) -> ItemsList {
    ItemsList::new(&config.list.instance_id, config.list_options())
        .with_translator(i18n::for_language(&config.display.language))
        .with_stores(Box::new(config.store_catalog()))
        .on_state_change(|state| {
            tracing::debug!(state = %state.to_query_value(), "View state changed");
        })
}

/// Load `source` into a list, restoring its view state.
pub fn load_list(config: &AppConfig, source: &ListSource) -> Result<ItemsList> {
    let products = load_products(&source.input)
        .with_context(|| format!("failed to load {}", source.input.display()))?;
    let mut list = build_list(config);
    list.first_display();
    list.set_items(products, &source.query(&config.list.instance_id));
    tracing::info!("Loaded {} products from {}", list.len(), source.input.display());
    Ok(list)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ListSource;
    use tempfile::TempDir;

    pub const PRODUCTS: &str = r#"[
        {"store": "billa", "id": "1", "name": "Bio Vollmilch", "price": 1.49,
         "quantity": 1000, "unit": "ml", "isOrganic": true,
         "priceHistory": [{"date": "2024-02-01", "price": 1.49}, {"date": "2024-01-01", "price": 1.29}]},
        {"store": "spar", "id": "2", "name": "Butter", "price": 2.99,
         "quantity": 250, "unit": "g",
         "priceHistory": [{"date": "2024-01-15", "price": 2.99}]},
        {"store": "billa", "id": "3", "name": "Äpfel", "price": 0.99,
         "priceHistory": [{"date": "2024-01-20", "price": 0.99}, {"date": "2024-01-01", "price": 1.10}]}
    ]"#;

    pub fn source(state: Option<&str>) -> (TempDir, ListSource) {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("items.json");
        std::fs::write(&input, PRODUCTS).unwrap();
        let source = ListSource {
            input,
            state: state.map(str::to_string),
        };
        (tmp, source)
    }
}
