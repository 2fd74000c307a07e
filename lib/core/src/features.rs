//! Bag-of-categories features.
//!
//! Each distinct tag across the catalog is one dimension, in order of first
//! appearance. An item's vector counts its tags, so the same catalog always
//! yields the same vocabulary and the same vectors.

use crate::catalog::Catalog;
use crate::vector::Vector;
use ahash::AHashMap;

/// Distinct tag tokens in first-occurrence order
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: AHashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimension of the token, registering it if unseen
    pub fn insert(&mut self, token: &str) -> usize {
        if let Some(&dim) = self.index.get(token) {
            return dim;
        }
        let dim = self.tokens.len();
        self.tokens.push(token.to_string());
        self.index.insert(token.to_string(), dim);
        dim
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Vocabulary plus one count vector per catalog row
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<Vector>,
}

impl FeatureSet {
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }
}

pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn build(catalog: &Catalog) -> FeatureSet {
        let mut vocabulary = Vocabulary::new();
        let token_dims: Vec<Vec<usize>> = catalog
            .items()
            .iter()
            .map(|item| item.tags.iter().map(|tag| vocabulary.insert(tag)).collect())
            .collect();

        // Dimension is only known once every item has been seen
        let dim = vocabulary.len();
        let vectors = token_dims
            .into_iter()
            .map(|dims| {
                let mut vector = Vector::zeros(dim);
                for d in dims {
                    vector.increment(d);
                }
                vector
            })
            .collect();

        FeatureSet { vocabulary, vectors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn catalog(rows: &[(u64, &str, &str)]) -> Catalog {
        Catalog::from_items(
            rows.iter()
                .filter_map(|(id, title, tags)| Item::from_tag_string(*id, title, tags, '|')),
        )
        .unwrap()
    }

    #[test]
    fn test_vocabulary_first_occurrence_order() {
        let catalog = catalog(&[
            (1, "A", "Comedy|Drama"),
            (2, "B", "Action|Comedy"),
            (3, "C", "Drama"),
        ]);
        let features = FeatureBuilder::build(&catalog);
        assert_eq!(features.vocabulary.tokens(), &["Comedy", "Drama", "Action"]);
        assert_eq!(features.dim(), 3);
        assert_eq!(features.vectors[0].as_slice(), &[1.0, 1.0, 0.0]);
        assert_eq!(features.vectors[1].as_slice(), &[1.0, 0.0, 1.0]);
        assert_eq!(features.vectors[2].as_slice(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_repeated_tag_counts_twice() {
        let catalog = catalog(&[(1, "A", "War|War|Drama")]);
        let features = FeatureBuilder::build(&catalog);
        assert_eq!(features.vectors[0].as_slice(), &[2.0, 1.0]);
    }

    #[test]
    fn test_case_sensitive_tokens() {
        let catalog = catalog(&[(1, "A", "drama"), (2, "B", "Drama")]);
        let features = FeatureBuilder::build(&catalog);
        assert_eq!(features.dim(), 2);
        assert_eq!(features.vocabulary.get("drama"), Some(0));
        assert_eq!(features.vocabulary.get("Drama"), Some(1));
    }

    #[test]
    fn test_deterministic() {
        let rows = [(1, "A", "X|Y"), (2, "B", "Z|X"), (3, "C", "Y")];
        let a = FeatureBuilder::build(&catalog(&rows));
        let b = FeatureBuilder::build(&catalog(&rows));
        assert_eq!(a.vocabulary.tokens(), b.vocabulary.tokens());
        assert_eq!(a.vectors, b.vectors);
    }
}
