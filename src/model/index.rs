//! Lookup table from unique id to collection position.
//!
//! The index is derived from the collection and never owns products. It is
//! rebuilt whenever the collection is replaced or reordered.

use super::Product;
use indexmap::IndexMap;

/// Unique-id → position lookup for a product collection.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ProductIndex {
    positions: IndexMap<String, usize>,
}

impl ProductIndex {
    /// Build the index for `products` in their current order.
    ///
    /// Duplicate unique ids resolve to the first occurrence.
    pub fn build(products: &[Product]) -> Self {
        let mut positions = IndexMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            positions
                .entry(product.unique_id.clone())
                .or_insert(position);
        }
        Self { positions }
    }

    /// Position of the product with `unique_id`.
    #[must_use]
    pub fn position(&self, unique_id: &str) -> Option<usize> {
        self.positions.get(unique_id).copied()
    }

    #[must_use]
    pub fn contains(&self, unique_id: &str) -> bool {
        self.positions.contains_key(unique_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Unique ids in collection order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_lookup() {
        let products = vec![
            Product::new("billa", "1", "Milch", 1.0),
            Product::new("spar", "1", "Milch", 1.1),
        ];
        let index = ProductIndex::build(&products);

        assert_eq!(index.len(), 2);
        assert_eq!(index.position("spar-1"), Some(1));
        assert_eq!(index.position("hofer-1"), None);
        assert_eq!(index.ids().collect::<Vec<_>>(), vec!["billa-1", "spar-1"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let products = vec![
            Product::new("billa", "1", "A", 1.0),
            Product::new("billa", "1", "B", 2.0),
        ];
        let index = ProductIndex::build(&products);
        assert_eq!(index.len(), 1);
        assert_eq!(index.position("billa-1"), Some(0));
    }

    #[test]
    fn test_empty() {
        let index = ProductIndex::build(&[]);
        assert!(index.is_empty());
        assert!(!index.contains("billa-1"));
    }
}
