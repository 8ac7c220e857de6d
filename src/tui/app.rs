//! Terminal application state.
//!
//! [`ListApp`] wraps an [`ItemsList`] with the state only the terminal
//! needs: the cursor, the scroll offset, the highlight prompt and the
//! status line. All list semantics stay in the list component.

use super::status::StatusMessage;
use crate::analytics::PriceMode;
use crate::export::{DirectorySink, ExportFormat, ExportSink};
use crate::i18n::TextKey;
use crate::list::{ItemsList, RowView};
use crate::sorting::SortMode;
use crate::view_state::QueryString;
use serde_json::{Value, json};
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

/// Key of the chart setting that plots relative instead of absolute prices.
pub const CHART_PERCENTAGE_KEY: &str = "percentage";

/// Terminal front end state.
pub struct ListApp {
    pub list: ItemsList,
    /// Cursor position in the materialized rows
    pub selected: usize,
    /// First row drawn in the table
    pub offset: usize,
    /// Rows that fit the table at the last draw
    pub viewport_rows: usize,
    /// Collection indices drawn at the last draw
    pub visible: Range<usize>,
    pub should_quit: bool,
    pub show_help: bool,
    /// Highlight prompt contents while it is open
    pub input: Option<String>,
    pub status: StatusMessage,
    export_sink: Box<dyn ExportSink>,
    pub tick: u64,
}

impl ListApp {
    /// Wrap a list that already holds its collection.
    pub fn new(list: ItemsList, export_dir: impl Into<PathBuf>) -> Self {
        Self::with_sink(list, Box::new(DirectorySink::new(export_dir)))
    }

    pub fn with_sink(list: ItemsList, export_sink: Box<dyn ExportSink>) -> Self {
        Self {
            list,
            selected: 0,
            offset: 0,
            viewport_rows: 0,
            visible: 0..0,
            should_quit: false,
            show_help: false,
            input: None,
            status: StatusMessage::with_auto_clear(Duration::from_secs(4)),
            export_sink,
            tick: 0,
        }
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&RowView> {
        self.list.rows().get(self.selected)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let last = self.list.rows().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }

    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let step = self.viewport_rows.max(1);
        let last = self.list.rows().len().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }

    pub fn page_up(&mut self) {
        let step = self.viewport_rows.max(1);
        self.selected = self.selected.saturating_sub(step);
    }

    pub const fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to the last materialized row.
    pub fn select_last(&mut self) {
        self.selected = self.list.rows().len().saturating_sub(1);
    }

    /// Report the rows drawn last to the list, materializing the next page
    /// when the end of the current one came into view.
    pub fn report_visible(&mut self) {
        if let Some(added) = self.list.notify_range_visible(self.visible.clone()) {
            tracing::debug!("Materialized rows {}..{}", added.start, added.end);
        }
    }

    fn reset_cursor(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    fn clamp_cursor(&mut self) {
        let last = self.list.rows().len().saturating_sub(1);
        self.selected = self.selected.min(last);
        self.offset = self.offset.min(self.selected);
    }

    // ------------------------------------------------------------------
    // List controls
    // ------------------------------------------------------------------

    pub fn toggle_price_mode(&mut self) {
        let mode = match self.list.controls().price_mode {
            PriceMode::Sales => PriceMode::Unit,
            PriceMode::Unit => PriceMode::Sales,
        };
        self.list.set_price_mode(mode);
        self.reset_cursor();
    }

    /// Advance to the next sort mode available for the collection.
    pub fn cycle_sort(&mut self) {
        let current = self.list.controls().sort_mode;
        let mut mode = current.next();
        while mode != current {
            if self.list.select_sort_mode(mode) {
                self.reset_cursor();
                let label = self
                    .list
                    .view()
                    .sort_options
                    .iter()
                    .find(|option| option.mode == mode)
                    .map(|option| option.label.clone())
                    .unwrap_or_default();
                self.status.set(label);
                return;
            }
            mode = mode.next();
        }
    }

    pub fn select_sort(&mut self, mode: SortMode) {
        if self.list.select_sort_mode(mode) {
            self.reset_cursor();
        } else {
            self.status.set(format!("{mode} is not available for this list"));
        }
    }

    pub fn toggle_chart(&mut self) {
        self.list.toggle_chart();
    }

    /// Flip between absolute prices and percentage change in the chart.
    pub fn toggle_chart_percentage(&mut self) {
        let percentage = chart_percentage(&self.list.chart().state());
        self.list
            .set_chart_state(json!({ CHART_PERCENTAGE_KEY: !percentage }));
    }

    /// Mark or unmark the selected product for charting.
    pub fn toggle_selected_mark(&mut self) {
        if !self.list.options().enable_item_chart {
            return;
        }
        if let Some(id) = self.selected_row().map(|row| row.unique_id.clone()) {
            self.list.toggle_item_chart(&id);
        }
    }

    pub fn toggle_all_histories(&mut self) {
        self.list.toggle_price_histories();
    }

    pub fn toggle_selected_history(&mut self) {
        let position = self.selected;
        self.list.toggle_row_history(position);
    }

    // ------------------------------------------------------------------
    // Highlight prompt
    // ------------------------------------------------------------------

    /// Open the prompt prefilled with the current keywords.
    pub fn start_highlight_input(&mut self) {
        self.input = Some(self.list.options().highlights.join(" "));
    }

    pub fn push_input(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Apply the prompt's whitespace separated keywords.
    pub fn submit_input(&mut self) {
        if let Some(input) = self.input.take() {
            let keywords = input.split_whitespace().map(str::to_string).collect();
            self.list.set_highlights(keywords);
            self.clamp_cursor();
        }
    }

    // ------------------------------------------------------------------
    // Export and sharing
    // ------------------------------------------------------------------

    pub fn export(&mut self, format: ExportFormat) {
        match self.list.download(format, self.export_sink.as_mut()) {
            Ok(Some(path)) => self.status.set(format!("Exported {}", path.display())),
            Ok(None) => self.status.set("Nothing to export"),
            Err(e) => {
                tracing::warn!("Export failed: {e}");
                self.status.set(format!("Export failed: {e}"));
            }
        }
    }

    /// Query string that restores the current view, keyed by the list id.
    #[must_use]
    pub fn share_string(&self) -> String {
        let mut query = QueryString::default();
        query.set(self.list.id(), self.list.capture_state().to_query_value());
        query.encode()
    }

    /// Put the share string on the status line.
    pub fn show_share_string(&mut self) {
        let label = self.list.translator().text(TextKey::ShareLink).into_owned();
        let share = self.share_string();
        self.status.set(format!("{label}: ?{share}"));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// Whether chart settings ask for percentage change.
#[must_use]
pub fn chart_percentage(state: &Value) -> bool {
    state
        .get(CHART_PERCENTAGE_KEY)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;
    use crate::list::ListOptions;
    use crate::model::Product;
    use crate::view_state::ViewState;

    fn app_with(count: usize) -> ListApp {
        let mut list = ItemsList::new("items", ListOptions::default());
        list.first_display();
        let items = (0..count)
            .map(|i| {
                Product::new("billa", i.to_string(), format!("Milk {i}"), 1.0 + i as f64)
                    .with_history(&[1.0 + i as f64, 2.0])
            })
            .collect();
        list.set_items(items, &());
        ListApp::with_sink(list, Box::new(MemorySink::default()))
    }

    #[test]
    fn test_navigation_stays_within_materialized_rows() {
        let mut app = app_with(30);
        app.select_last();
        assert_eq!(app.selected, 24);
        app.select_next();
        assert_eq!(app.selected, 24);
        app.viewport_rows = 10;
        app.page_up();
        assert_eq!(app.selected, 14);
        app.select_first();
        app.select_prev();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_reporting_last_row_loads_next_page() {
        let mut app = app_with(30);
        app.visible = 0..10;
        app.report_visible();
        assert_eq!(app.list.rows().len(), 25);

        app.visible = 20..25;
        app.report_visible();
        assert_eq!(app.list.rows().len(), 30);
    }

    #[test]
    fn test_cycle_sort_skips_unavailable_modes() {
        let mut list = ItemsList::new(
            "items",
            ListOptions {
                similarity_limit: 1,
                ..ListOptions::default()
            },
        );
        list.first_display();
        list.set_items(
            vec![
                Product::new("billa", "1", "A", 1.0),
                Product::new("spar", "2", "B", 2.0),
            ],
            &(),
        );
        let mut app = ListApp::with_sink(list, Box::new(MemorySink::default()));

        for _ in 0..SortMode::ALL.len() {
            app.cycle_sort();
            assert_ne!(app.list.controls().sort_mode, SortMode::Similarity);
        }
    }

    #[test]
    fn test_price_mode_toggle_resets_cursor() {
        let mut app = app_with(5);
        app.selected = 3;
        app.toggle_price_mode();
        assert_eq!(app.list.controls().price_mode, PriceMode::Unit);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_mark_selected_shows_chart() {
        let mut app = app_with(3);
        app.selected = 1;
        let id = app.selected_row().unwrap().unique_id.clone();
        app.toggle_selected_mark();

        assert!(app.list.chart().is_visible());
        assert_eq!(app.list.capture_state().items_to_chart, vec![id]);
    }

    #[test]
    fn test_chart_percentage_round_trips_through_state() {
        let mut app = app_with(3);
        app.toggle_chart();
        app.toggle_chart_percentage();
        assert!(chart_percentage(&app.list.chart().state()));
        assert!(chart_percentage(&app.list.capture_state().chart_state));
    }

    #[test]
    fn test_highlight_prompt() {
        let mut app = app_with(3);
        app.start_highlight_input();
        for c in "milk  1".chars() {
            app.push_input(c);
        }
        app.pop_input();
        app.submit_input();

        assert!(app.input.is_none());
        assert_eq!(app.list.options().highlights, vec!["milk".to_string()]);
        assert!(app.list.rows()[0].name.contains("<strong>Milk</strong>"));
    }

    #[test]
    fn test_export_sets_status() {
        let mut app = app_with(2);
        app.export(ExportFormat::Csv);
        assert_eq!(app.status.peek(), Some("Exported items.csv"));

        let mut empty = app_with(0);
        empty.export(ExportFormat::Json);
        assert_eq!(empty.status.peek(), Some("Nothing to export"));
    }

    #[test]
    fn test_share_string_restores_view() {
        let mut app = app_with(4);
        app.toggle_price_mode();
        app.toggle_all_histories();

        let query = QueryString::parse(&app.share_string());
        let state = ViewState::read_from(&query, "items").unwrap();
        assert_eq!(state, app.list.capture_state());
    }
}
