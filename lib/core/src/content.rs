//! Content-based recommendations from shared category tags.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::features::{FeatureBuilder, Vocabulary};
use crate::item::ItemId;
use crate::rank::{merge_rankings, unique_seeds, Candidate};
use crate::recommender::{RecommendationRequest, Recommender};
use crate::similarity::SimilarityIndex;
use crate::Result;

/// Content model over one catalog.
///
/// Features and the similarity index are computed once in [`new`](Self::new)
/// and only read afterwards, so a single engine can serve concurrent requests
/// behind an `Arc` without locking. Loading a new catalog means building a
/// new engine.
#[derive(Debug)]
pub struct ContentRecommender {
    catalog: Catalog,
    vocabulary: Vocabulary,
    index: SimilarityIndex,
    config: EngineConfig,
}

impl ContentRecommender {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let catalog = match config.subset_size {
            Some(n) if n < catalog.len() => catalog.subset(n)?,
            _ => catalog,
        };

        let features = FeatureBuilder::build(&catalog);
        let index = SimilarityIndex::build(&features.vectors, config.dense_limit);

        Ok(Self {
            catalog,
            vocabulary: features.vocabulary,
            index,
            config,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Similarity between two items by id
    pub fn similarity(&self, a: ItemId, b: ItemId) -> Option<f32> {
        let i = self.catalog.index_of_id(a)?;
        let j = self.catalog.index_of_id(b)?;
        Some(self.index.get(i, j))
    }

    /// Ranked candidates for already-resolved seed rows
    pub fn recommend_indexes(&self, seeds: &[usize], top_n: usize) -> Vec<Candidate> {
        let seeds = unique_seeds(seeds);
        let rows: Vec<_> = seeds.iter().map(|&s| self.index.row(s)).collect();
        merge_rankings(&rows, &seeds, top_n, self.config.candidate_pool)
    }

    /// Recommend `top_n` titles for three liked titles
    pub fn content_model<S: AsRef<str>>(&self, titles: &[S], top_n: usize) -> Result<Vec<String>> {
        let request = RecommendationRequest::new(titles, top_n)?;
        self.recommend(&request)
    }
}

impl Recommender for ContentRecommender {
    fn name(&self) -> &'static str {
        "content"
    }

    fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<String>> {
        let seeds = self.catalog.resolve_all(request.seed_titles().as_slice())?;
        Ok(self
            .recommend_indexes(&seeds, request.top_n())
            .into_iter()
            .filter_map(|c| self.catalog.get(c.index).map(|item| item.title.clone()))
            .collect())
    }
}
