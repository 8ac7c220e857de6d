//! Sort engine for product collections.
//!
//! [`sort_products`] consumes the collection and returns it reordered under
//! one of six [`SortMode`] policies. Sorting is stable, so applying the same
//! deterministic mode twice yields the same order.
//!
//! The similarity policy hands the collection to a [`SimilarityRanker`];
//! because ranking is quadratic in the collection size, the list refuses to
//! select it above [`DEFAULT_SIMILARITY_LIMIT`] items.

mod similarity;

pub use similarity::{NameSimilarityRanker, NameVector, SimilarityRanker};

use crate::analytics::PriceMode;
use crate::model::{Product, Quantity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Collections larger than this cannot be sorted by name similarity.
pub const DEFAULT_SIMILARITY_LIMIT: usize = 500;

/// Selectable ordering policy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
pub enum SortMode {
    #[default]
    #[serde(rename = "price-asc")]
    #[value(name = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    #[value(name = "price-desc")]
    PriceDesc,
    #[serde(rename = "quantity-asc")]
    #[value(name = "quantity-asc")]
    QuantityAsc,
    #[serde(rename = "quantity-desc")]
    #[value(name = "quantity-desc")]
    QuantityDesc,
    #[serde(rename = "store-and-name")]
    #[value(name = "store-and-name")]
    StoreAndName,
    #[serde(rename = "similarity", alias = "similar")]
    #[value(name = "similarity", alias = "similar")]
    Similarity,
}

impl SortMode {
    /// All modes in selector order.
    pub const ALL: [Self; 6] = [
        Self::PriceAsc,
        Self::PriceDesc,
        Self::QuantityAsc,
        Self::QuantityDesc,
        Self::StoreAndName,
        Self::Similarity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::QuantityAsc => "quantity-asc",
            Self::QuantityDesc => "quantity-desc",
            Self::StoreAndName => "store-and-name",
            Self::Similarity => "similarity",
        }
    }

    /// Whether sorting twice with this mode always gives the same order.
    #[must_use]
    pub const fn is_deterministic(self) -> bool {
        !matches!(self, Self::Similarity)
    }

    /// Whether this mode may be selected for a collection of `len` items.
    #[must_use]
    pub const fn is_available_for(self, len: usize, similarity_limit: usize) -> bool {
        !matches!(self, Self::Similarity) || len <= similarity_limit
    }

    /// Next mode in selector order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let position = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "quantity-asc" => Ok(Self::QuantityAsc),
            "quantity-desc" => Ok(Self::QuantityDesc),
            "store-and-name" => Ok(Self::StoreAndName),
            "similarity" | "similar" => Ok(Self::Similarity),
            _ => Err(format!("Unknown sort mode: {s}")),
        }
    }
}

/// Reorder `items` under `mode`.
///
/// Price modes compare the sales or unit price depending on `price_mode`.
/// Quantity modes group by unit string (always ascending) and order by
/// quantity within a unit. Similarity delegates to `ranker`.
#[must_use]
pub fn sort_products(
    mut items: Vec<Product>,
    mode: SortMode,
    price_mode: PriceMode,
    ranker: &dyn SimilarityRanker,
) -> Vec<Product> {
    match mode {
        SortMode::PriceAsc => {
            items.sort_by(|a, b| price_mode.price_of(a).total_cmp(&price_mode.price_of(b)));
        }
        SortMode::PriceDesc => {
            items.sort_by(|a, b| price_mode.price_of(b).total_cmp(&price_mode.price_of(a)));
        }
        SortMode::QuantityAsc => items.sort_by(|a, b| compare_by_quantity(a, b, false)),
        SortMode::QuantityDesc => items.sort_by(|a, b| compare_by_quantity(a, b, true)),
        SortMode::StoreAndName => {
            items.sort_by(|a, b| a.store.cmp(&b.store).then_with(|| a.name.cmp(&b.name)));
        }
        SortMode::Similarity => {
            tracing::debug!("Ranking {} products by name similarity", items.len());
            return ranker.rank(items);
        }
    }
    items
}

fn compare_by_quantity(a: &Product, b: &Product, descending: bool) -> Ordering {
    a.unit_str().cmp(b.unit_str()).then_with(|| {
        let ordering = compare_quantities(a.quantity.as_ref(), b.quantity.as_ref());
        if descending { ordering.reverse() } else { ordering }
    })
}

/// Total order over optional quantities: amounts numerically, then labels
/// lexically, then missing quantities.
fn compare_quantities(a: Option<&Quantity>, b: Option<&Quantity>) -> Ordering {
    const fn class(quantity: Option<&Quantity>) -> u8 {
        match quantity {
            Some(Quantity::Amount(_)) => 0,
            Some(Quantity::Label(_)) => 1,
            None => 2,
        }
    }

    match (a, b) {
        (Some(Quantity::Amount(x)), Some(Quantity::Amount(y))) => x.total_cmp(y),
        (Some(Quantity::Label(x)), Some(Quantity::Label(y))) => x.cmp(y),
        _ => class(a).cmp(&class(b)),
    }
}
