//! Chart sub-component seam.
//!
//! The list hands the chart a copy of its collection and treats the chart's
//! own settings as an opaque JSON blob it only stores and restores.

use crate::model::Product;
use serde_json::Value;

/// A chart that plots the price histories of marked products.
pub trait ChartPanel {
    /// Replace the charted collection with a copy of the list's items.
    fn set_items(&mut self, items: Vec<Product>);

    fn items(&self) -> &[Product];

    /// Opaque chart settings, `Value::Null` when there are none.
    fn state(&self) -> Value;

    fn set_state(&mut self, state: Value);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Products currently marked for charting.
    fn marked(&self) -> Vec<&Product> {
        self.items().iter().filter(|p| p.chart).collect()
    }
}

/// Chart that only records what it was given.
///
/// Used when no drawing surface is attached, and by the terminal front end
/// as the backing store of its chart pane.
#[derive(Debug, Clone, Default)]
pub struct DetachedChart {
    items: Vec<Product>,
    state: Value,
    visible: bool,
}

impl DetachedChart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartPanel for DetachedChart {
    fn set_items(&mut self, items: Vec<Product>) {
        tracing::trace!("Chart received {} items", items.len());
        self.items = items;
    }

    fn items(&self) -> &[Product] {
        &self.items
    }

    fn state(&self) -> Value {
        self.state.clone()
    }

    fn set_state(&mut self, state: Value) {
        self.state = state;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
