//! Per-store metadata: display name, brand color and product URL template.

use crate::model::Product;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata for one store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StoreInfo {
    /// Name shown in the store column
    pub display_name: String,
    /// Brand color as `#rrggbb` or a named terminal color
    pub color: String,
    /// Product page URL with `{id}`, `{store}` and `{name}` placeholders
    pub url_template: String,
}

impl StoreInfo {
    pub fn new(
        display_name: impl Into<String>,
        color: impl Into<String>,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            color: color.into(),
            url_template: url_template.into(),
        }
    }

    /// Product page URL. The name is percent-encoded.
    #[must_use]
    pub fn url_for(&self, product: &Product) -> String {
        self.url_template
            .replace("{id}", &product.id)
            .replace("{store}", &product.store)
            .replace("{name}", &urlencoding::encode(&product.name))
    }
}

/// Lookup of store metadata by store id.
pub trait StoreRegistry {
    fn store(&self, id: &str) -> Option<&StoreInfo>;

    /// Display name, falling back to the store id.
    fn display_name(&self, id: &str) -> String {
        self.store(id)
            .filter(|info| !info.display_name.is_empty())
            .map_or_else(|| id.to_string(), |info| info.display_name.clone())
    }

    /// Product page URL, empty for unknown stores.
    fn url_for(&self, product: &Product) -> String {
        self.store(&product.store)
            .map(|info| info.url_for(product))
            .unwrap_or_default()
    }
}

/// Registry built from the `stores` configuration section.
#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    stores: IndexMap<String, StoreInfo>,
}

impl StoreCatalog {
    #[must_use]
    pub fn new(stores: IndexMap<String, StoreInfo>) -> Self {
        Self { stores }
    }

    #[must_use]
    pub fn with_store(mut self, id: impl Into<String>, info: StoreInfo) -> Self {
        self.stores.insert(id.into(), info);
        self
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl StoreRegistry for StoreCatalog {
    fn store(&self, id: &str) -> Option<&StoreInfo> {
        self.stores.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StoreCatalog {
        StoreCatalog::default().with_store(
            "billa",
            StoreInfo::new("Billa", "yellow", "https://shop.billa.at/produkte/{name}-{id}"),
        )
    }

    #[test]
    fn test_url_substitution() {
        let product = Product::new("billa", "00-1234", "Bio Milch", 1.49);
        assert_eq!(
            catalog().url_for(&product),
            "https://shop.billa.at/produkte/Bio%20Milch-00-1234"
        );
    }

    #[test]
    fn test_unknown_store_fallbacks() {
        let product = Product::new("lidl", "7", "Brot", 1.0);
        assert_eq!(catalog().display_name("lidl"), "lidl");
        assert_eq!(catalog().url_for(&product), "");
        assert_eq!(catalog().display_name("billa"), "Billa");
    }

    #[test]
    fn test_empty_display_name_falls_back() {
        let catalog = StoreCatalog::default().with_store("spar", StoreInfo::default());
        assert_eq!(catalog.display_name("spar"), "spar");
        assert_eq!(catalog.len(), 1);
    }
}
