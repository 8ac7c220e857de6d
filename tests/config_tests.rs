//! Integration tests for configuration files layered under CLI overrides.

use price_list::config::{AppConfig, Validatable, load_config_file};
use price_list::model::Product;
use price_list::stores::{StoreInfo, StoreRegistry};
use price_list::{SortMode, analytics::PriceMode};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(yaml: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".price-list.yaml");
    std::fs::write(&path, yaml).unwrap();
    (tmp, path)
}

#[test]
fn test_file_config_reaches_list_options() {
    let (_tmp, path) = write_config(
        "list:\n  page_size: 10\n  initial_sort: quantity-desc\n  sales_price: false\n",
    );

    let config = load_config_file(&path).unwrap();
    let options = config.list_options();
    assert_eq!(options.page_size, 10);
    assert_eq!(options.initial_sort, SortMode::QuantityDesc);
    assert_eq!(options.initial_price_mode, PriceMode::Unit);
    assert_eq!(options.similarity_limit, 500);
}

#[test]
fn test_cli_overrides_win_over_file() {
    let (_tmp, path) = write_config(
        r#"
list:
  page_size: 10
  highlights: [milch]
display:
  theme: light
stores:
  billa:
    display_name: Billa
    color: yellow
    url_template: "https://shop.billa.at/produkte/{id}"
"#,
    );

    let overrides = AppConfig::builder()
        .highlights(vec!["butter".into()])
        .store("spar", StoreInfo::new("Spar", "green", "https://spar.at/{id}"))
        .build();
    let (config, loaded_from) = AppConfig::from_file_with_overrides(Some(&path), &overrides);

    assert_eq!(loaded_from, Some(path));
    assert_eq!(config.list.page_size, 10);
    assert_eq!(config.display.theme, "light");
    assert_eq!(config.list.highlights, vec!["butter".to_string()]);
    assert_eq!(config.stores.len(), 2);
    assert!(config.is_valid());
}

#[test]
fn test_store_catalog_from_config() {
    let (_tmp, path) = write_config(
        "stores:\n  billa:\n    display_name: Billa\n    color: yellow\n    url_template: \"https://shop.billa.at/produkte/{id}\"\n",
    );
    let config = load_config_file(&path).unwrap();
    let catalog = config.store_catalog();

    let milk = Product::new("billa", "4711", "Bio Milch", 1.49);
    let butter = Product::new("spar", "42", "Butter", 2.99);
    assert_eq!(catalog.url_for(&milk), "https://shop.billa.at/produkte/4711");
    assert_eq!(catalog.url_for(&butter), "");
    assert_eq!(catalog.display_name("billa"), "Billa");
}

#[test]
fn test_invalid_file_values_are_reported() {
    let (_tmp, path) = write_config("list:\n  page_size: 0\ndisplay:\n  theme: neon\n");
    let config = load_config_file(&path).unwrap();

    let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["list.page_size", "display.theme"]);
}
