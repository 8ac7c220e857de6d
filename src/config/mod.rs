//! Configuration for the price list.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use price_list::config::{AppConfig, load_or_default};
//!
//! let (config, loaded_from) = load_or_default(None);
//! let list = ItemsList::new(&config.list.instance_id, config.list_options());
//! ```
//!
//! # Configuration File
//!
//! Place a `.price-list.yaml` file in the working directory or
//! `~/.config/price-list/`:
//!
//! ```yaml
//! list:
//!   initial_sort: store-and-name
//!   sales_price: false
//! display:
//!   theme: light
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_INSTANCE_ID, DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE, DEFAULT_SIMILARITY_LIMIT,
    DEFAULT_THEME, THEMES,
};
pub use types::{AppConfig, AppConfigBuilder, DisplayConfig, ExportConfig, ListConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, generate_full_example_config,
    load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.price-list.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
