//! Price analytics derived from a product's price history.
//!
//! Everything here is computed on demand for display and never stored on the
//! product: normalized quantities, percentage change against the previous
//! price, the unit-price suffix and the geometry of the history bars.
//!
//! All functions are total as long as the price history is non-empty.

use crate::model::{PriceEntry, Product, Quantity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width in pixels/cells of the bar for the highest price in a history.
pub const BAR_MAX_WIDTH: f64 = 190.0;

/// Quantities at or above this many grams/millilitres are shown in kg/l.
const KILO_THRESHOLD: f64 = 1000.0;

/// Generic per-piece suffix for unit prices of non-metric units.
pub const PIECE_SUFFIX: &str = "stk";

/// Which price the list displays and sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceMode {
    /// Total price of the item as sold
    #[default]
    Sales,
    /// Price per reference unit (kg, l, piece)
    Unit,
}

impl PriceMode {
    /// Map the `salesPrice` flag of a view state to a mode.
    #[must_use]
    pub const fn from_sales_flag(sales_price: bool) -> Self {
        if sales_price { Self::Sales } else { Self::Unit }
    }

    #[must_use]
    pub const fn is_sales(self) -> bool {
        matches!(self, Self::Sales)
    }

    /// The price of `product` under this mode.
    #[must_use]
    pub const fn price_of(self, product: &Product) -> f64 {
        match self {
            Self::Sales => product.price,
            Self::Unit => product.unit_price,
        }
    }
}

/// Quantity and unit after metric rescaling.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuantity {
    pub quantity: Option<Quantity>,
    pub unit: String,
}

impl fmt::Display for NormalizedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quantity {
            Some(quantity) => write!(f, "{quantity} {}", self.unit),
            None => f.write_str(&self.unit),
        }
    }
}

/// Rescale grams/millilitres to kilograms/litres for quantities ≥ 1000.
///
/// The rescaled amount is rounded to two decimals. Label quantities and all
/// other units pass through unchanged.
#[must_use]
pub fn normalize_quantity(product: &Product) -> NormalizedQuantity {
    let unit = product.unit_str();
    if let Some(Quantity::Amount(amount)) = product.quantity
        && amount >= KILO_THRESHOLD
        && (unit == "g" || unit == "ml")
    {
        let scaled = (amount * 0.001 * 100.0).round() / 100.0;
        return NormalizedQuantity {
            quantity: Some(Quantity::Amount(scaled)),
            unit: if unit == "ml" { "l" } else { "kg" }.to_string(),
        };
    }

    NormalizedQuantity {
        quantity: product.quantity.clone(),
        unit: unit.to_string(),
    }
}

/// Quantity column text, prefixed with a scale symbol for weighted goods.
#[must_use]
pub fn quantity_label(product: &Product) -> String {
    let prefix = if product.is_weighted { "⚖ " } else { "" };
    format!("{prefix}{}", normalize_quantity(product).to_string().trim())
}

/// Rounded percentage change of the current price against the previous one.
///
/// `None` means there is no previous price (or it was zero). This is
/// distinct from `Some(0)`, an unchanged price.
#[must_use]
pub fn percentage_change(product: &Product) -> Option<i64> {
    let current = product.price_history.first()?.price;
    let previous = product.previous_price()?;
    if previous == 0.0 {
        return None;
    }
    Some(round_half_up((current - previous) / previous * 100.0) as i64)
}

/// Suffix shown after a unit price, `None` in sales-price mode.
#[must_use]
pub fn price_unit_suffix(unit: Option<&str>, mode: PriceMode) -> Option<&'static str> {
    match mode {
        PriceMode::Sales => None,
        PriceMode::Unit => Some(match unit {
            Some("g") => "kg",
            Some("ml") => "l",
            _ => PIECE_SUFFIX,
        }),
    }
}

/// Display text of the price column under `mode`.
#[must_use]
pub fn format_price(product: &Product, mode: PriceMode) -> String {
    let price = mode.price_of(product);
    match price_unit_suffix(product.unit.as_deref(), mode) {
        Some(suffix) => format!("{price:.2} / {suffix}"),
        None => format!("{price:.2}"),
    }
}

/// Signed percentage text, e.g. `+10%` or `-3%`.
#[must_use]
pub fn format_change(change: i64) -> String {
    if change > 0 {
        format!("+{change}%")
    } else {
        format!("{change}%")
    }
}

/// Whether a price moved up or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTrend {
    /// Price went up
    MoreExpensive,
    /// Price went down or stayed the same
    Cheaper,
}

impl PriceTrend {
    #[must_use]
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Self::MoreExpensive
        } else {
            Self::Cheaper
        }
    }
}

/// One bar of the price history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBar {
    pub date: NaiveDate,
    pub price: f64,
    pub unit_price: Option<f64>,
    /// Percentage change against the next older entry (0 for the oldest)
    pub change: f64,
    /// `ceil(190 × price / max price in history)`
    pub width: u32,
}

impl HistoryBar {
    #[must_use]
    pub fn trend(&self) -> PriceTrend {
        PriceTrend::of(self.change)
    }

    /// Change label, `None` for unchanged entries.
    #[must_use]
    pub fn change_label(&self) -> Option<String> {
        if self.change == 0.0 {
            return None;
        }
        let rounded = round_half_up(self.change) as i64;
        Some(if self.change >= 0.0 {
            format!("+{rounded}%")
        } else {
            format!("{rounded}%")
        })
    }
}

/// Bars for every history entry, newest first.
#[must_use]
pub fn history_bars(history: &[PriceEntry]) -> Vec<HistoryBar> {
    let max = history
        .iter()
        .map(|entry| entry.price)
        .fold(f64::NEG_INFINITY, f64::max);

    history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let change = history
                .get(index + 1)
                .filter(|older| older.price != 0.0)
                .map_or(0.0, |older| (entry.price - older.price) / older.price * 100.0);
            let width = if max > 0.0 {
                (entry.price / max * BAR_MAX_WIDTH).ceil() as u32
            } else {
                0
            };
            HistoryBar {
                date: entry.date,
                price: entry.price,
                unit_price: entry.unit_price,
                change,
                width,
            }
        })
        .collect()
}

/// Round half toward positive infinity, so that -2.5 becomes -2.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk(quantity: f64, unit: &str) -> Product {
        Product::new("billa", "1", "Milch", 1.0).with_quantity(quantity, unit)
    }

    #[test]
    fn test_normalize_grams_to_kilograms() {
        let normalized = normalize_quantity(&milk(1500.0, "g"));
        assert_eq!(normalized.quantity, Some(Quantity::Amount(1.5)));
        assert_eq!(normalized.unit, "kg");
    }

    #[test]
    fn test_normalize_millilitres_to_litres() {
        let normalized = normalize_quantity(&milk(1500.0, "ml"));
        assert_eq!(normalized.quantity, Some(Quantity::Amount(1.5)));
        assert_eq!(normalized.unit, "l");
    }

    #[test]
    fn test_normalize_below_threshold_unchanged() {
        let normalized = normalize_quantity(&milk(999.0, "g"));
        assert_eq!(normalized.quantity, Some(Quantity::Amount(999.0)));
        assert_eq!(normalized.unit, "g");
    }

    #[test]
    fn test_normalize_rounds_two_decimals() {
        let normalized = normalize_quantity(&milk(1234.0, "g"));
        assert_eq!(normalized.quantity, Some(Quantity::Amount(1.23)));
    }

    #[test]
    fn test_normalize_other_units_and_labels_pass_through() {
        let normalized = normalize_quantity(&milk(6000.0, "stk"));
        assert_eq!(normalized.quantity, Some(Quantity::Amount(6000.0)));
        assert_eq!(normalized.unit, "stk");

        let label = Product::new("spar", "2", "Kräuter", 1.0).with_quantity_label("1 Bund");
        let normalized = normalize_quantity(&label);
        assert_eq!(normalized.quantity, Some(Quantity::Label("1 Bund".into())));
        assert_eq!(normalized.unit, "");
    }

    #[test]
    fn test_quantity_label() {
        assert_eq!(quantity_label(&milk(1500.0, "g")), "1.5 kg");
        assert_eq!(quantity_label(&milk(500.0, "g").weighted()), "⚖ 500 g");
        assert_eq!(quantity_label(&Product::new("spar", "2", "X", 1.0)), "");
    }

    #[test]
    fn test_percentage_change() {
        let up = Product::new("billa", "1", "A", 1.0).with_history(&[110.0, 100.0]);
        assert_eq!(percentage_change(&up), Some(10));

        let down = Product::new("billa", "1", "A", 1.0).with_history(&[90.0, 100.0]);
        assert_eq!(percentage_change(&down), Some(-10));

        let single = Product::new("billa", "1", "A", 1.0).with_history(&[90.0]);
        assert_eq!(percentage_change(&single), None);

        let same = Product::new("billa", "1", "A", 1.0).with_history(&[90.0, 90.0]);
        assert_eq!(percentage_change(&same), Some(0));
    }

    #[test]
    fn test_percentage_change_rounds_half_up() {
        // -2.5% rounds toward +∞
        let product = Product::new("billa", "1", "A", 1.0).with_history(&[97.5, 100.0]);
        assert_eq!(percentage_change(&product), Some(-2));
        let product = Product::new("billa", "1", "A", 1.0).with_history(&[102.5, 100.0]);
        assert_eq!(percentage_change(&product), Some(3));
    }

    #[test]
    fn test_percentage_change_zero_previous() {
        let product = Product::new("billa", "1", "A", 1.0).with_history(&[1.0, 0.0]);
        assert_eq!(percentage_change(&product), None);
    }

    #[test]
    fn test_price_unit_suffix() {
        assert_eq!(price_unit_suffix(Some("g"), PriceMode::Sales), None);
        assert_eq!(price_unit_suffix(Some("g"), PriceMode::Unit), Some("kg"));
        assert_eq!(price_unit_suffix(Some("ml"), PriceMode::Unit), Some("l"));
        assert_eq!(price_unit_suffix(Some("stk"), PriceMode::Unit), Some("stk"));
        assert_eq!(price_unit_suffix(None, PriceMode::Unit), Some("stk"));
    }

    #[test]
    fn test_format_price() {
        let product = milk(500.0, "g").with_unit_price(3.98);
        assert_eq!(format_price(&product, PriceMode::Sales), "1.00");
        assert_eq!(format_price(&product, PriceMode::Unit), "3.98 / kg");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(10), "+10%");
        assert_eq!(format_change(-10), "-10%");
        assert_eq!(format_change(0), "0%");
    }

    #[test]
    fn test_history_bars_single_entry() {
        let product = Product::new("billa", "1", "A", 2.0);
        let bars = history_bars(&product.price_history);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].width, 190);
        assert_eq!(bars[0].change, 0.0);
        assert_eq!(bars[0].change_label(), None);
    }

    #[test]
    fn test_history_bars_widths_and_changes() {
        let product = Product::new("billa", "1", "A", 1.0).with_history(&[1.0, 2.0, 1.0]);
        let bars = history_bars(&product.price_history);

        assert_eq!(bars.iter().map(|b| b.width).collect::<Vec<_>>(), vec![95, 190, 95]);
        // Newest: 2.0 → 1.0, middle: 1.0 → 2.0, oldest: no predecessor
        assert_eq!(bars[0].change, -50.0);
        assert_eq!(bars[1].change, 100.0);
        assert_eq!(bars[2].change, 0.0);
        assert_eq!(bars[0].trend(), PriceTrend::Cheaper);
        assert_eq!(bars[1].trend(), PriceTrend::MoreExpensive);
        assert_eq!(bars[0].change_label().as_deref(), Some("-50%"));
        assert_eq!(bars[1].change_label().as_deref(), Some("+100%"));
    }

    #[test]
    fn test_history_bars_width_rounds_up() {
        let product = Product::new("billa", "1", "A", 1.0).with_history(&[1.0, 3.0]);
        let bars = history_bars(&product.price_history);
        // 190 / 3 = 63.33…
        assert_eq!(bars[0].width, 64);
        assert_eq!(bars[1].width, 190);
    }

    #[test]
    fn test_history_bars_zero_prices() {
        let product = Product::new("billa", "1", "A", 0.0).with_history(&[0.0, 0.0]);
        let bars = history_bars(&product.price_history);
        assert!(bars.iter().all(|bar| bar.width == 0 && bar.change == 0.0));
    }

    #[test]
    fn test_price_mode_flags() {
        assert_eq!(PriceMode::from_sales_flag(true), PriceMode::Sales);
        assert_eq!(PriceMode::from_sales_flag(false), PriceMode::Unit);
        assert!(PriceMode::Sales.is_sales());
    }
}
