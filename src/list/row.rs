//! Display model of one materialized list row.

use super::highlight::Highlighter;
use crate::analytics::{self, HistoryBar, PriceMode, PriceTrend};
use crate::i18n::{TextKey, Translator};
use crate::model::Product;
use crate::stores::StoreRegistry;

pub const CHEVRON_EXPANDED: &str = "▲";
pub const CHEVRON_COLLAPSED: &str = "▼";

/// Everything a surface needs to draw one product row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position in the sorted collection
    pub position: usize,
    pub unique_id: String,
    pub store: String,
    pub store_color: String,
    /// Name with highlight markup
    pub name: String,
    pub url: String,
    pub unavailable: bool,
    /// Normalized quantity with unit, `⚖ ` prefixed for weighted goods
    pub quantity: String,
    /// Price text with currency symbol and unit suffix
    pub price: String,
    /// Percentage change against the previous price
    pub change: Option<i64>,
    /// Number of older history entries
    pub older_prices: usize,
    pub expanded: bool,
    /// History bars, newest first
    pub bars: Vec<HistoryBar>,
    /// Whether the per-row chart toggle is offered
    pub chart_enabled: bool,
    pub chart_marked: bool,
}

impl RowView {
    /// Expand indicator, `None` when there is no older price to show.
    #[must_use]
    pub const fn chevron(&self) -> Option<&'static str> {
        if self.older_prices == 0 {
            None
        } else if self.expanded {
            Some(CHEVRON_EXPANDED)
        } else {
            Some(CHEVRON_COLLAPSED)
        }
    }

    #[must_use]
    pub fn change_trend(&self) -> Option<PriceTrend> {
        self.change.map(|change| PriceTrend::of(change as f64))
    }

    #[must_use]
    pub fn change_label(&self) -> Option<String> {
        self.change.map(analytics::format_change)
    }
}

/// Borrowed inputs for building rows of the current render pass.
pub(crate) struct RowContext<'a> {
    pub items: &'a [Product],
    pub stores: &'a dyn StoreRegistry,
    pub translator: &'a dyn Translator,
    pub highlighter: &'a Highlighter,
    pub price_mode: PriceMode,
    pub expanded: bool,
    pub chart_enabled: bool,
}

impl RowContext<'_> {
    pub(crate) fn build(&self, position: usize) -> RowView {
        let product = &self.items[position];
        let currency = self.translator.text(TextKey::CurrencySymbol);
        let color = self
            .stores
            .store(&product.store)
            .map(|info| info.color.clone())
            .unwrap_or_default();

        RowView {
            position,
            unique_id: product.unique_id.clone(),
            store: self.stores.display_name(&product.store),
            store_color: color,
            name: self.highlighter.apply(&product.name),
            url: self.stores.url_for(product),
            unavailable: product.unavailable,
            quantity: analytics::quantity_label(product),
            price: format!("{currency} {}", analytics::format_price(product, self.price_mode)),
            change: analytics::percentage_change(product),
            older_prices: product.price_history.len().saturating_sub(1),
            expanded: self.expanded,
            bars: analytics::history_bars(&product.price_history),
            chart_enabled: self.chart_enabled,
            chart_marked: product.chart,
        }
    }
}
