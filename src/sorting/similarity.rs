//! Name similarity ranking.
//!
//! Product names are turned into sparse term vectors (word tokens plus
//! character trigrams) and ordered as a greedy nearest-neighbour chain, so
//! that similar products end up next to each other.

use crate::model::Product;
use std::collections::{HashMap, HashSet};

/// Reorders a collection by textual closeness of product names.
pub trait SimilarityRanker {
    /// Return `items` in similarity order.
    fn rank(&self, items: Vec<Product>) -> Vec<Product>;
}

/// Sparse term-frequency vector of a product name.
#[derive(Debug, Clone, Default)]
pub struct NameVector {
    terms: HashMap<String, f64>,
    norm: f64,
}

impl NameVector {
    /// Vectorize a single name.
    ///
    /// Word tokens weigh twice as much as trigrams so whole-word matches
    /// dominate partial overlaps.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        let mut terms: HashMap<String, f64> = HashMap::new();

        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            *terms.entry(format!("w:{token}")).or_default() += 2.0;

            let padded: Vec<char> = format!(" {token} ").chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                *terms.entry(format!("t:{trigram}")).or_default() += 1.0;
            }
        }

        let norm = terms.values().map(|v| v * v).sum::<f64>().sqrt();
        Self { terms, norm }
    }

    /// Cosine similarity in `[0, 1]`; empty vectors are dissimilar to all.
    #[must_use]
    pub fn cosine(&self, other: &Self) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        let (small, large) = if self.terms.len() <= other.terms.len() {
            (self, other)
        } else {
            (other, self)
        };
        let dot: f64 = small
            .terms
            .iter()
            .filter_map(|(term, weight)| large.terms.get(term).map(|w| w * weight))
            .sum();
        dot / (self.norm * other.norm)
    }
}

/// Default ranker: greedy nearest-neighbour chain over [`NameVector`]s.
///
/// The chain starts at the alphabetically first name, and ties are broken
/// by Jaro-Winkler similarity and then unique id, so the result does not
/// depend on the incoming order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameSimilarityRanker;

impl NameSimilarityRanker {
    /// Vectorize every product name.
    #[must_use]
    pub fn vectorize(items: &[Product]) -> Vec<NameVector> {
        items.iter().map(|p| NameVector::from_name(&p.name)).collect()
    }

    /// Chain order as indices into `items`.
    fn chain(items: &[Product], vectors: &[NameVector]) -> Vec<usize> {
        let Some(start) = (0..items.len()).min_by(|&a, &b| {
            items[a]
                .name
                .to_lowercase()
                .cmp(&items[b].name.to_lowercase())
                .then_with(|| items[a].unique_id.cmp(&items[b].unique_id))
        }) else {
            return Vec::new();
        };

        let mut order = Vec::with_capacity(items.len());
        let mut visited = HashSet::with_capacity(items.len());
        let mut current = start;
        order.push(current);
        visited.insert(current);

        while order.len() < items.len() {
            let current_name = items[current].name.to_lowercase();
            let next = (0..items.len())
                .filter(|i| !visited.contains(i))
                .map(|i| {
                    let score = vectors[current].cosine(&vectors[i]);
                    let tie = strsim::jaro_winkler(&current_name, &items[i].name.to_lowercase());
                    (i, score, tie)
                })
                .max_by(|a, b| {
                    a.1.total_cmp(&b.1)
                        .then_with(|| a.2.total_cmp(&b.2))
                        .then_with(|| items[b.0].unique_id.cmp(&items[a.0].unique_id))
                })
                .map(|(i, _, _)| i);

            match next {
                Some(i) => {
                    order.push(i);
                    visited.insert(i);
                    current = i;
                }
                None => break,
            }
        }
        order
    }
}

impl SimilarityRanker for NameSimilarityRanker {
    fn rank(&self, items: Vec<Product>) -> Vec<Product> {
        let vectors = Self::vectorize(&items);
        let order = Self::chain(&items, &vectors);

        let mut slots: Vec<Option<Product>> = items.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect()
    }
}
