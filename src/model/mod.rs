//! Product data model.
//!
//! [`Product`] mirrors the store feed layout. [`ProductIndex`] resolves
//! unique ids back to positions in the collection owned by the list.
//!
//! ```ignore
//! let products = load_products(Path::new("items.json"))?;
//! let index = ProductIndex::build(&products);
//! let milk = index.position("billa-4711").map(|i| &products[i]);
//! ```

mod index;
mod product;

pub use index::ProductIndex;
pub use product::{PriceEntry, Product, Quantity};

use crate::error::{LoadErrorKind, PriceListError, Result};
use std::path::Path;

/// Parse a JSON array of products.
///
/// Fills missing unique ids and rejects products without any price
/// history, since every rendered row needs a current price.
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = serde_json::from_str(json)?;
    for product in &mut products {
        product.ensure_unique_id();
        if product.price_history.is_empty() {
            return Err(PriceListError::load(
                "validating price histories",
                LoadErrorKind::EmptyHistory(product.unique_id.clone()),
            ));
        }
    }
    tracing::debug!("Parsed {} products", products.len());
    Ok(products)
}

/// Load a JSON product file.
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let content = std::fs::read_to_string(path).map_err(|e| PriceListError::io(path, e))?;
    parse_products(&content)
}
