//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".price-list.yaml", ".price-list.yml", "price-list.yaml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/price-list/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("price-list"))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl From<ConfigFileError> for crate::PriceListError {
    fn from(err: ConfigFileError) -> Self {
        Self::config(err.to_string())
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a config built
    /// from CLI flags can be layered over the file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.list.page_size != defaults.list.page_size {
            self.list.page_size = other.list.page_size;
        }
        if other.list.similarity_limit != defaults.list.similarity_limit {
            self.list.similarity_limit = other.list.similarity_limit;
        }
        if other.list.initial_sort != defaults.list.initial_sort {
            self.list.initial_sort = other.list.initial_sort;
        }
        if !other.list.sales_price {
            self.list.sales_price = false;
        }
        if !other.list.enable_item_chart {
            self.list.enable_item_chart = false;
        }
        if other.list.instance_id != defaults.list.instance_id {
            self.list.instance_id.clone_from(&other.list.instance_id);
        }
        if !other.list.highlights.is_empty() {
            self.list.highlights.clone_from(&other.list.highlights);
        }

        if other.display.language != defaults.display.language {
            self.display.language.clone_from(&other.display.language);
        }
        if other.display.theme != defaults.display.theme {
            self.display.theme.clone_from(&other.display.theme);
        }

        if other.export.output_dir.is_some() {
            self.export.output_dir.clone_from(&other.export.output_dir);
        }
        if other.export.format != defaults.export.format {
            self.export.format = other.export.format;
        }

        for (id, store) in &other.stores {
            self.stores.insert(id.clone(), store.clone());
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Price list configuration
# Place this file at .price-list.yaml in the working directory or ~/.config/price-list/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# Price List Configuration File
# =============================
#
# Place it at:
#   - .price-list.yaml in the working directory
#   - ~/.config/price-list/price-list.yaml for global config
#
# CLI arguments always override file settings.

list:
  # Rows materialized per page
  page_size: 25
  # Largest collection that may be sorted by name similarity
  similarity_limit: 500
  # price-asc, price-desc, quantity-asc, quantity-desc, store-and-name, similarity
  initial_sort: price-asc
  # false starts in unit-price mode
  sales_price: true
  enable_item_chart: true
  # Key of the shareable view state
  instance_id: items
  highlights: []

display:
  language: en
  # Theme: dark, light, high-contrast
  theme: dark

export:
  # output_dir: ./exports
  format: json

stores:
  billa:
    display_name: Billa
    color: yellow
    url_template: "https://shop.billa.at/produkte/{id}"
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::SortMode;
    use crate::stores::StoreInfo;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".price-list.yaml");
        std::fs::write(&config_path, "list:\n  page_size: 10\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r#"
list:
  initial_sort: store-and-name
  sales_price: false
stores:
  spar:
    display_name: Spar
    color: green
    url_template: "https://spar.at/{id}"
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.list.initial_sort, SortMode::StoreAndName);
        assert!(!config.list.sales_price);
        assert_eq!(config.stores["spar"].display_name, "Spar");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "list:\n  page_size: many\n").unwrap();
        assert!(matches!(load_config_file(&config_path), Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().page_size(40).language("de").build();
        let overrides = AppConfig::builder()
            .initial_sort(SortMode::PriceDesc)
            .output_dir("/tmp/out")
            .store("billa", StoreInfo::new("Billa", "yellow", "https://billa.at/{id}"))
            .build();

        base.merge(&overrides);

        assert_eq!(base.list.page_size, 40);
        assert_eq!(base.display.language, "de");
        assert_eq!(base.list.initial_sort, SortMode::PriceDesc);
        assert_eq!(base.export.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(base.stores.contains_key("billa"));
    }

    #[test]
    fn test_example_configs_parse() {
        let example: AppConfig = serde_yaml::from_str(&generate_example_config()).unwrap();
        assert_eq!(example, AppConfig::default());

        let full: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full.stores.len(), 1);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "display:\n  theme: light\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
