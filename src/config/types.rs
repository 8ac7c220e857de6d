//! Configuration types for the price list.

use super::defaults::{
    DEFAULT_INSTANCE_ID, DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE, DEFAULT_SIMILARITY_LIMIT,
    DEFAULT_THEME,
};
use crate::analytics::PriceMode;
use crate::export::ExportFormat;
use crate::list::ListOptions;
use crate::sorting::SortMode;
use crate::stores::{StoreCatalog, StoreInfo};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// List behavior (paging, sorting, chart toggles)
    pub list: ListConfig,
    /// Language and theme
    pub display: DisplayConfig,
    /// Export destination
    pub export: ExportConfig,
    /// Store metadata keyed by store id
    pub stores: BTreeMap<String, StoreInfo>,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Options for constructing an [`ItemsList`](crate::list::ItemsList).
    #[must_use]
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            page_size: self.list.page_size,
            similarity_limit: self.list.similarity_limit,
            initial_sort: self.list.initial_sort,
            initial_price_mode: PriceMode::from_sales_flag(self.list.sales_price),
            enable_item_chart: self.list.enable_item_chart,
            highlights: self.list.highlights.clone(),
        }
    }

    /// Store registry from the `stores` section.
    #[must_use]
    pub fn store_catalog(&self) -> StoreCatalog {
        StoreCatalog::new(
            self.stores
                .iter()
                .map(|(id, info)| (id.clone(), info.clone()))
                .collect(),
        )
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.config.list.page_size = page_size;
        self
    }

    pub const fn similarity_limit(mut self, limit: usize) -> Self {
        self.config.list.similarity_limit = limit;
        self
    }

    pub const fn initial_sort(mut self, mode: SortMode) -> Self {
        self.config.list.initial_sort = mode;
        self
    }

    /// Start in sales-price (`true`) or unit-price (`false`) mode.
    pub const fn sales_price(mut self, sales_price: bool) -> Self {
        self.config.list.sales_price = sales_price;
        self
    }

    pub fn highlights(mut self, keywords: Vec<String>) -> Self {
        self.config.list.highlights = keywords;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.display.language = language.into();
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.display.theme = theme.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.export.output_dir = Some(dir.into());
        self
    }

    pub fn store(mut self, id: impl Into<String>, info: StoreInfo) -> Self {
        self.config.stores.insert(id.into(), info);
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Types
// ============================================================================

/// List behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ListConfig {
    /// Rows materialized per page
    #[schemars(range(min = 1))]
    pub page_size: usize,
    /// Largest collection that may be sorted by name similarity
    #[schemars(range(min = 1))]
    pub similarity_limit: usize,
    /// Sort mode applied on first display
    pub initial_sort: SortMode,
    /// Start in sales-price mode (`false` for unit price)
    pub sales_price: bool,
    /// Offer the per-row chart toggle
    pub enable_item_chart: bool,
    /// Key the shareable view state is stored under
    pub instance_id: String,
    /// Keywords highlighted in product names
    pub highlights: Vec<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            similarity_limit: DEFAULT_SIMILARITY_LIMIT,
            initial_sort: SortMode::PriceAsc,
            sales_price: true,
            enable_item_chart: true,
            instance_id: DEFAULT_INSTANCE_ID.to_string(),
            highlights: Vec::new(),
        }
    }
}

/// Language and theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DisplayConfig {
    /// Two-letter language code
    pub language: String,
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Export destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exports are written to (current directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Format used when none is given on the command line
    pub format: ExportFormat,
}

impl ExportConfig {
    /// Effective output directory.
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.list.page_size, 25);
        assert_eq!(config.list.similarity_limit, 500);
        assert_eq!(config.list.instance_id, "items");
        assert_eq!(config.display.language, "en");
        assert_eq!(config.export.dir(), PathBuf::from("."));
    }

    #[test]
    fn test_builder_and_list_options() {
        let config = AppConfig::builder()
            .page_size(10)
            .initial_sort(SortMode::StoreAndName)
            .sales_price(false)
            .highlights(vec!["milch".into()])
            .build();

        let options = config.list_options();
        assert_eq!(options.page_size, 10);
        assert_eq!(options.initial_sort, SortMode::StoreAndName);
        assert_eq!(options.initial_price_mode, PriceMode::Unit);
        assert_eq!(options.highlights, vec!["milch".to_string()]);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("list:\n  page_size: 50\n").unwrap();
        assert_eq!(config.list.page_size, 50);
        assert_eq!(config.list.similarity_limit, 500);
        assert_eq!(config.display, DisplayConfig::default());
    }
}
