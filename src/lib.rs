//! **A sortable, paged retail price list with shareable view state.**
//!
//! `price-list` takes a collection of priced products from grocery store
//! feeds and turns it into an interactive list: six sort orders, sales or
//! unit prices, percentage changes against the previous price, expandable
//! price histories, keyword highlighting and JSON/CSV export. Everything a
//! user configures can be captured as a [`ViewState`] and restored later,
//! so a view can be shared as a query string.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Product`] and its price history, plus the JSON loader.
//! - **[`analytics`]**: normalized quantities, percentage change, price
//!   suffixes and history bar geometry.
//! - **[`sorting`]**: the sort engine. Similarity ordering is delegated to
//!   a [`SimilarityRanker`](sorting::SimilarityRanker).
//! - **[`render`]**: the incremental renderer that materializes rows one
//!   page at a time as the viewport reaches the end of a page.
//! - **[`list`]**: [`ItemsList`], composing the above behind control methods.
//! - **[`view_state`]**: the shareable snapshot and where it is read from.
//! - **[`export`]**: JSON/CSV rendering and export sinks.
//! - **[`tui`]**: the ratatui front end.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use price_list::{ItemsList, ListOptions, SortMode, load_products};
//! use price_list::view_state::QueryString;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let products = load_products(Path::new("items.json"))?;
//!
//!     let mut list = ItemsList::new("items", ListOptions::default());
//!     list.first_display();
//!     list.set_items(products, &QueryString::parse("?items=%7B%22sortType%22%3A%22price-desc%22%7D"));
//!     list.select_sort_mode(SortMode::StoreAndName);
//!
//!     for row in list.rows() {
//!         println!("{} {} {}", row.store, row.name, row.price);
//!     }
//!     println!("share: ?items={}", list.capture_state().to_query_value());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Price math and layout casts between usize, u16, u32, i64 and f64 are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools
)]

pub mod analytics;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod list;
pub mod model;
pub mod render;
pub mod sorting;
pub mod stores;
pub mod tui;
pub mod view_state;

// Re-export main types for convenience
pub use analytics::PriceMode;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{PriceListError, Result};
pub use export::{ExportFormat, ExportSink};
pub use list::{ItemsList, ListControls, ListOptions, RowView};
pub use model::{Product, load_products, parse_products};
pub use sorting::{SortMode, sort_products};
pub use view_state::ViewState;
