//! The product list component.
//!
//! [`ItemsList`] owns the product collection and composes the sort engine,
//! the incremental renderer, price analytics and the view state. Surfaces
//! drive it through control methods and draw whatever [`ItemsList::view`]
//! returns.
//!
//! ```ignore
//! let mut list = ItemsList::new("items", ListOptions::default())
//!     .on_state_change(|state| println!("{}", state.to_query_value()));
//! list.first_display();
//! list.set_items(products, &QueryString::parse(query));
//! list.select_sort_mode(SortMode::StoreAndName);
//! ```

mod highlight;
mod row;

pub use highlight::{Highlighter, Segment, emphasis_segments, highlight_matches};
pub use row::{CHEVRON_COLLAPSED, CHEVRON_EXPANDED, RowView};

use crate::analytics::PriceMode;
use crate::chart::{ChartPanel, DetachedChart};
use crate::export::{self, ExportFormat, ExportSink};
use crate::i18n::{English, TextKey, Translator};
use crate::model::{Product, ProductIndex};
use crate::render::{IncrementalRenderer, PAGE_SIZE, VisibilityTrigger};
use crate::sorting::{
    DEFAULT_SIMILARITY_LIMIT, NameSimilarityRanker, SimilarityRanker, SortMode, sort_products,
};
use crate::stores::{StoreCatalog, StoreRegistry};
use crate::view_state::{StateSource, ViewState};
use row::RowContext;
use std::ops::Range;
use std::path::PathBuf;

/// The user-selectable controls that decide order and displayed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListControls {
    pub price_mode: PriceMode,
    pub sort_mode: SortMode,
}

/// Construction-time settings of a list.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page_size: usize,
    /// Largest collection that may be sorted by name similarity
    pub similarity_limit: usize,
    /// Sort mode applied by [`ItemsList::first_display`]
    pub initial_sort: SortMode,
    pub initial_price_mode: PriceMode,
    /// Offer the per-row chart toggle
    pub enable_item_chart: bool,
    /// Keywords to highlight in product names
    pub highlights: Vec<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            similarity_limit: DEFAULT_SIMILARITY_LIMIT,
            initial_sort: SortMode::PriceAsc,
            initial_price_mode: PriceMode::Sales,
            enable_item_chart: true,
            highlights: Vec::new(),
        }
    }
}

/// One entry of the sort selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub mode: SortMode,
    pub label: String,
    pub selected: bool,
    /// Not selectable for the current collection
    pub disabled: bool,
}

/// Everything a surface draws for the list.
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    /// `"<count> Results"`
    pub summary: String,
    pub total: usize,
    pub exports: [ExportFormat; 2],
    pub chart_label: String,
    pub chart_visible: bool,
    pub sales_price_label: String,
    pub unit_price_label: String,
    pub price_mode: PriceMode,
    pub sort_label: String,
    pub sort_options: Vec<SortOption>,
    /// Store, name and price column headers
    pub headers: [String; 3],
    /// Price header chevron for the global history toggle
    pub chevron: &'static str,
    pub rows: &'a [RowView],
}

type StateCallback = Box<dyn FnMut(&ViewState)>;

/// Sortable, paged product list with shareable view state.
pub struct ItemsList {
    id: String,
    options: ListOptions,
    items: Vec<Product>,
    index: ProductIndex,
    controls: ListControls,
    prices_expanded: bool,
    restored: bool,
    highlighter: Highlighter,
    renderer: IncrementalRenderer<RowView>,
    translator: Box<dyn Translator>,
    chart: Box<dyn ChartPanel>,
    stores: Box<dyn StoreRegistry>,
    ranker: Box<dyn SimilarityRanker>,
    on_state_change: Option<StateCallback>,
}

impl ItemsList {
    /// Create an empty list. `id` is the key its view state is stored under.
    pub fn new(id: impl Into<String>, options: ListOptions) -> Self {
        let highlighter = Highlighter::new(&options.highlights);
        Self {
            id: id.into(),
            items: Vec::new(),
            index: ProductIndex::default(),
            controls: ListControls {
                price_mode: options.initial_price_mode,
                sort_mode: SortMode::default(),
            },
            prices_expanded: false,
            restored: false,
            highlighter,
            renderer: IncrementalRenderer::new(options.page_size),
            translator: Box::new(English),
            chart: Box::new(DetachedChart::new()),
            stores: Box::new(StoreCatalog::default()),
            ranker: Box::new(NameSimilarityRanker),
            on_state_change: None,
            options,
        }
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: Box<dyn ChartPanel>) -> Self {
        self.chart = chart;
        self
    }

    #[must_use]
    pub fn with_stores(mut self, stores: Box<dyn StoreRegistry>) -> Self {
        self.stores = stores;
        self
    }

    #[must_use]
    pub fn with_ranker(mut self, ranker: Box<dyn SimilarityRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Register the callback notified after every user-driven control change.
    #[must_use]
    pub fn on_state_change(mut self, callback: impl FnMut(&ViewState) + 'static) -> Self {
        self.on_state_change = Some(Box::new(callback));
        self
    }

    /// Apply the initial sort selection.
    pub fn first_display(&mut self) {
        self.controls.sort_mode = self.options.initial_sort;
        self.render();
    }

    /// Replace the collection.
    ///
    /// Collapses price histories, hides the chart and, the first time a
    /// non-empty collection arrives, restores the view state stored in
    /// `source` under this list's id.
    pub fn set_items(&mut self, items: Vec<Product>, source: &dyn StateSource) {
        self.items = items;
        self.index = ProductIndex::build(&self.items);
        self.chart.set_items(self.items.clone());
        self.chart.set_visible(false);
        self.prices_expanded = false;
        tracing::debug!(list = %self.id, "Received {} items", self.items.len());

        if !self.restored && !self.items.is_empty() {
            self.restored = true;
            if let Some(state) = ViewState::read_from(source, &self.id) {
                self.restore_state(&state);
                return;
            }
        }
        self.render();
    }

    /// Sort per the current controls and start a new render pass with the
    /// first page materialized.
    pub fn render(&mut self) {
        let ListControls {
            price_mode,
            sort_mode,
        } = self.controls;
        if sort_mode.is_available_for(self.items.len(), self.options.similarity_limit) {
            let items = std::mem::take(&mut self.items);
            self.items = sort_products(items, sort_mode, price_mode, self.ranker.as_ref());
            self.index = ProductIndex::build(&self.items);
        } else {
            tracing::debug!(
                "Collection of {} exceeds the similarity limit, keeping current order",
                self.items.len()
            );
        }

        self.renderer.reset(self.items.len());
        self.materialize(|renderer, build| {
            renderer.materialize_next(build);
        });
    }

    /// Build rows through `step` with a context borrowing the current state.
    fn materialize<T>(
        &mut self,
        step: impl FnOnce(&mut IncrementalRenderer<RowView>, &mut dyn FnMut(usize) -> RowView) -> T,
    ) -> T {
        let context = RowContext {
            items: &self.items,
            stores: self.stores.as_ref(),
            translator: self.translator.as_ref(),
            highlighter: &self.highlighter,
            price_mode: self.controls.price_mode,
            expanded: self.prices_expanded,
            chart_enabled: self.options.enable_item_chart,
        };
        step(&mut self.renderer, &mut |position| context.build(position))
    }

    /// Fire a visibility trigger reported by the surface.
    pub fn notify_visible(&mut self, trigger: VisibilityTrigger) -> Option<Range<usize>> {
        self.materialize(|renderer, build| renderer.notify_visible(trigger, build))
    }

    /// Report the collection indices currently on screen.
    pub fn notify_range_visible(&mut self, visible: Range<usize>) -> Option<Range<usize>> {
        self.materialize(|renderer, build| renderer.notify_range_visible(visible, build))
    }

    #[must_use]
    pub fn pending_trigger(&self) -> Option<VisibilityTrigger> {
        self.renderer.pending_trigger()
    }

    pub fn set_price_mode(&mut self, mode: PriceMode) {
        if self.controls.price_mode == mode {
            return;
        }
        self.controls.price_mode = mode;
        self.render();
        self.notify_state_change();
    }

    /// Select a sort mode. Returns `false`, leaving the list unchanged, when
    /// the mode is not available for the current collection.
    pub fn select_sort_mode(&mut self, mode: SortMode) -> bool {
        if !mode.is_available_for(self.items.len(), self.options.similarity_limit) {
            tracing::debug!(
                "Refusing {mode} for {} items (limit {})",
                self.items.len(),
                self.options.similarity_limit
            );
            return false;
        }
        self.controls.sort_mode = mode;
        self.render();
        self.notify_state_change();
        true
    }

    /// Show or hide the chart panel.
    pub fn toggle_chart(&mut self) {
        let visible = !self.chart.is_visible();
        self.chart.set_visible(visible);
        self.notify_state_change();
    }

    /// Replace the chart's own settings.
    pub fn set_chart_state(&mut self, state: serde_json::Value) {
        self.chart.set_state(state);
        self.notify_state_change();
    }

    /// Flip the chart mark of one product, showing the chart if hidden.
    ///
    /// Returns `false` for unknown ids.
    pub fn toggle_item_chart(&mut self, unique_id: &str) -> bool {
        let Some(position) = self.index.position(unique_id) else {
            tracing::debug!("No item '{unique_id}' to chart");
            return false;
        };
        if !self.chart.is_visible() {
            self.chart.set_visible(true);
        }
        let marked = !self.items[position].chart;
        self.items[position].chart = marked;
        if let Some(row) = self.renderer.rows_mut().get_mut(position) {
            row.chart_marked = marked;
        }
        self.chart.set_items(self.items.clone());
        self.notify_state_change();
        true
    }

    /// Expand or collapse the price history of every row.
    pub fn toggle_price_histories(&mut self) {
        self.prices_expanded = !self.prices_expanded;
        let expanded = self.prices_expanded;
        for row in self.renderer.rows_mut() {
            row.expanded = expanded;
        }
    }

    /// Expand or collapse the price history of the row at `position`.
    ///
    /// Returns `false` when the row is not materialized or has no older
    /// prices.
    pub fn toggle_row_history(&mut self, position: usize) -> bool {
        match self.renderer.rows_mut().get_mut(position) {
            Some(row) if row.older_prices > 0 => {
                row.expanded = !row.expanded;
                true
            }
            _ => false,
        }
    }

    /// Replace the highlight keywords and re-render.
    pub fn set_highlights(&mut self, keywords: Vec<String>) {
        self.highlighter = Highlighter::new(&keywords);
        self.options.highlights = keywords;
        self.render();
    }

    /// Snapshot of every user-configurable setting.
    #[must_use]
    pub fn capture_state(&self) -> ViewState {
        ViewState {
            sales_price: self.controls.price_mode.is_sales(),
            sort_mode: self.controls.sort_mode,
            show_chart: self.chart.is_visible(),
            prices_expanded: self.prices_expanded,
            chart_state: self.chart.state(),
            items_to_chart: self
                .items
                .iter()
                .filter(|item| item.chart)
                .map(|item| item.unique_id.clone())
                .collect(),
        }
    }

    /// Apply a captured state and re-render.
    ///
    /// Chart marks are replaced by exactly the listed ids that exist in the
    /// collection. Similarity is ignored above the similarity limit.
    pub fn restore_state(&mut self, state: &ViewState) {
        self.controls.price_mode = state.price_mode();
        if state
            .sort_mode
            .is_available_for(self.items.len(), self.options.similarity_limit)
        {
            self.controls.sort_mode = state.sort_mode;
        } else {
            tracing::debug!("Ignoring restored sort mode {}", state.sort_mode);
        }

        for item in &mut self.items {
            item.chart = false;
        }
        let mut resolved = 0usize;
        for id in &state.items_to_chart {
            if let Some(position) = self.index.position(id) {
                self.items[position].chart = true;
                resolved += 1;
            }
        }
        tracing::debug!(
            "Restored {resolved} of {} chart marks",
            state.items_to_chart.len()
        );

        self.prices_expanded = state.prices_expanded;
        self.chart.set_visible(state.show_chart);
        if state.show_chart && !state.chart_state.is_null() {
            self.chart.set_state(state.chart_state.clone());
        }
        self.chart.set_items(self.items.clone());
        self.render();
    }

    /// Export the collection in its current order.
    ///
    /// Returns `Ok(None)` without delivering anything when the list is empty.
    pub fn download(
        &self,
        format: ExportFormat,
        sink: &mut dyn ExportSink,
    ) -> crate::Result<Option<PathBuf>> {
        if self.items.is_empty() {
            tracing::debug!("Nothing to export");
            return Ok(None);
        }
        let records = export::export_records(&self.items, self.stores.as_ref());
        let contents = export::render(&records, format)?;
        sink.deliver(format.file_name(), &contents).map(Some)
    }

    /// Current display model.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        let t = self.translator.as_ref();
        let total = self.items.len();
        let sort_options = SortMode::ALL
            .iter()
            .map(|&mode| SortOption {
                mode,
                label: t.text(sort_label_key(mode)).into_owned(),
                selected: mode == self.controls.sort_mode,
                disabled: !mode.is_available_for(total, self.options.similarity_limit),
            })
            .collect();

        ListView {
            summary: format!("{total} {}", t.text(TextKey::Results)),
            total,
            exports: [ExportFormat::Json, ExportFormat::Csv],
            chart_label: t.text(TextKey::Chart).into_owned(),
            chart_visible: self.chart.is_visible(),
            sales_price_label: t.text(TextKey::SalesPrice).into_owned(),
            unit_price_label: t.text(TextKey::UnitPrice).into_owned(),
            price_mode: self.controls.price_mode,
            sort_label: t.text(TextKey::SortBy).into_owned(),
            sort_options,
            headers: [
                t.text(TextKey::Store).into_owned(),
                t.text(TextKey::Name).into_owned(),
                t.text(TextKey::Price).into_owned(),
            ],
            chevron: if self.prices_expanded {
                CHEVRON_EXPANDED
            } else {
                CHEVRON_COLLAPSED
            },
            rows: self.renderer.rows(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The collection in display order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn controls(&self) -> ListControls {
        self.controls
    }

    #[must_use]
    pub const fn prices_expanded(&self) -> bool {
        self.prices_expanded
    }

    /// Whether a stored view state was already looked up.
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        self.restored
    }

    #[must_use]
    pub fn rows(&self) -> &[RowView] {
        self.renderer.rows()
    }

    #[must_use]
    pub fn chart(&self) -> &dyn ChartPanel {
        self.chart.as_ref()
    }

    /// Mutable chart access, e.g. for the chart's own settings.
    pub fn chart_mut(&mut self) -> &mut dyn ChartPanel {
        self.chart.as_mut()
    }

    #[must_use]
    pub fn stores(&self) -> &dyn StoreRegistry {
        self.stores.as_ref()
    }

    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    #[must_use]
    pub const fn options(&self) -> &ListOptions {
        &self.options
    }

    fn notify_state_change(&mut self) {
        let state = self.capture_state();
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(&state);
        }
    }
}

const fn sort_label_key(mode: SortMode) -> TextKey {
    match mode {
        SortMode::PriceAsc => TextKey::PriceAscending,
        SortMode::PriceDesc => TextKey::PriceDescending,
        SortMode::QuantityAsc => TextKey::QuantityAscending,
        SortMode::QuantityDesc => TextKey::QuantityDescending,
        SortMode::StoreAndName => TextKey::StoreAndName,
        SortMode::Similarity => TextKey::NameSimilarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| Product::new("billa", i.to_string(), format!("Item {i:03}"), (count - i) as f64))
            .collect()
    }

    fn no_state() -> HashMap<String, String> {
        HashMap::new()
    }

    fn list_with(items: Vec<Product>) -> ItemsList {
        let mut list = ItemsList::new("items", ListOptions::default());
        list.first_display();
        list.set_items(items, &no_state());
        list
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let list = list_with(Vec::new());
        assert!(list.rows().is_empty());
        assert_eq!(list.pending_trigger(), None);
        assert_eq!(list.view().summary, "0 Results");
    }

    #[test]
    fn test_first_page_and_trigger() {
        let mut list = list_with(products(57));
        assert_eq!(list.rows().len(), 25);
        // Price ascending: the cheapest item comes first
        assert_eq!(list.rows()[0].unique_id, "billa-56");

        let trigger = list.pending_trigger().unwrap();
        assert_eq!(list.notify_visible(trigger), Some(25..50));
        assert_eq!(list.notify_visible(trigger), None);
        let trigger = list.pending_trigger().unwrap();
        assert_eq!(list.notify_visible(trigger), Some(50..57));
        assert_eq!(list.pending_trigger(), None);
    }

    #[test]
    fn test_control_change_starts_new_pass() {
        let mut list = list_with(products(30));
        let stale = list.pending_trigger().unwrap();

        assert!(list.select_sort_mode(SortMode::PriceDesc));
        assert_eq!(list.notify_visible(stale), None);
        assert_eq!(list.rows().len(), 25);
        assert_eq!(list.rows()[0].unique_id, "billa-0");
    }

    #[test]
    fn test_state_change_callback() {
        let seen: Rc<RefCell<Vec<ViewState>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut list = ItemsList::new("items", ListOptions::default())
            .on_state_change(move |state| sink.borrow_mut().push(state.clone()));
        list.set_items(products(3), &no_state());

        list.set_price_mode(PriceMode::Unit);
        list.set_price_mode(PriceMode::Unit);
        list.toggle_chart();
        assert!(list.toggle_item_chart("billa-1"));
        assert!(!list.toggle_item_chart("missing"));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(!seen[0].sales_price);
        assert!(seen[1].show_chart);
        assert_eq!(seen[2].items_to_chart, vec!["billa-1".to_string()]);
    }

    #[test]
    fn test_item_chart_shows_hidden_chart() {
        let mut list = list_with(products(3));
        assert!(!list.chart().is_visible());
        list.toggle_item_chart("billa-2");
        assert!(list.chart().is_visible());
        assert_eq!(list.chart().marked().len(), 1);

        let row = list.rows().iter().find(|r| r.unique_id == "billa-2").unwrap();
        assert!(row.chart_marked);

        list.toggle_item_chart("billa-2");
        assert!(list.chart().is_visible());
        assert!(list.chart().marked().is_empty());
    }

    #[test]
    fn test_similarity_refused_above_limit() {
        let options = ListOptions {
            similarity_limit: 2,
            ..ListOptions::default()
        };
        let mut list = ItemsList::new("items", options);
        list.set_items(products(3), &no_state());

        assert!(!list.select_sort_mode(SortMode::Similarity));
        assert_eq!(list.controls().sort_mode, SortMode::PriceAsc);
        let similarity = list
            .view()
            .sort_options
            .into_iter()
            .find(|o| o.mode == SortMode::Similarity)
            .unwrap();
        assert!(similarity.disabled);
    }

    #[test]
    fn test_toggle_price_histories_syncs_rows() {
        let items = (0..30)
            .map(|i| Product::new("spar", i.to_string(), "Brot", 1.0).with_history(&[1.0, 0.9]))
            .collect();
        let mut list = list_with(items);
        assert_eq!(list.view().chevron, CHEVRON_COLLAPSED);

        list.toggle_price_histories();
        assert!(list.rows().iter().all(|r| r.expanded));
        assert_eq!(list.view().chevron, CHEVRON_EXPANDED);

        // Rows materialized later follow the current setting
        let trigger = list.pending_trigger().unwrap();
        list.notify_visible(trigger);
        assert!(list.rows()[29].expanded);

        assert!(list.toggle_row_history(3));
        assert!(!list.rows()[3].expanded);
        assert!(list.rows()[4].expanded);
        assert!(!list.toggle_row_history(99));
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let mut list = list_with(products(10));
        list.set_price_mode(PriceMode::Unit);
        list.select_sort_mode(SortMode::StoreAndName);
        list.toggle_item_chart("billa-4");
        list.toggle_price_histories();
        let captured = list.capture_state();

        list.restore_state(&captured);
        assert_eq!(list.capture_state(), captured);
    }

    #[test]
    fn test_restore_from_source_once() {
        let state = ViewState {
            sort_mode: SortMode::PriceDesc,
            show_chart: true,
            items_to_chart: vec!["billa-1".into(), "unknown".into()],
            chart_state: serde_json::json!({"sumStores": true}),
            ..ViewState::default()
        };
        let mut source = HashMap::new();
        source.insert("items".to_string(), state.to_query_value());

        let mut list = ItemsList::new("items", ListOptions::default());
        list.set_items(Vec::new(), &source);
        assert!(!list.is_restored());

        list.set_items(products(5), &source);
        assert!(list.is_restored());
        assert_eq!(list.controls().sort_mode, SortMode::PriceDesc);
        assert!(list.chart().is_visible());
        assert_eq!(list.chart().state()["sumStores"], true);
        assert_eq!(list.capture_state().items_to_chart, vec!["billa-1".to_string()]);

        // A second collection does not restore again and hides the chart
        list.set_items(products(5), &source);
        assert!(!list.chart().is_visible());
    }

    #[test]
    fn test_download() {
        let mut sink = MemorySink::default();
        let list = list_with(Vec::new());
        assert_eq!(list.download(ExportFormat::Json, &mut sink).unwrap(), None);
        assert!(sink.files.is_empty());

        let list = list_with(products(2));
        let path = list.download(ExportFormat::Csv, &mut sink).unwrap();
        assert_eq!(path, Some(PathBuf::from("items.csv")));
        assert_eq!(sink.files[0].1.lines().count(), 3);
    }

    #[test]
    fn test_highlights_in_rows() {
        let options = ListOptions {
            highlights: vec!["item".into()],
            ..ListOptions::default()
        };
        let mut list = ItemsList::new("items", options);
        list.set_items(products(1), &no_state());
        assert_eq!(list.rows()[0].name, "<strong>Item</strong> 000");

        list.set_highlights(Vec::new());
        assert_eq!(list.rows()[0].name, "Item 000");
    }
}
