//! Item-based collaborative filtering over historical ratings.
//!
//! An item is the sparse vector of the ratings users gave it; two items are
//! similar when the same users rated both highly. Rows are computed per seed
//! through a user -> items inverted index, so nothing quadratic is stored.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::item::ItemId;
use crate::rank::{merge_rankings, unique_seeds, Candidate};
use crate::recommender::{RecommendationRequest, Recommender};
use crate::Result;
use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One user's rating of one item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: u64,
    pub item_id: ItemId,
    pub rating: f32,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

#[derive(Debug)]
pub struct CollaborativeRecommender {
    catalog: Catalog,
    /// Per catalog row: (user slot, rating)
    item_ratings: Vec<Vec<(usize, f32)>>,
    /// Per user slot: (catalog row, rating)
    user_ratings: Vec<Vec<(usize, f32)>>,
    norms: Vec<f32>,
    config: EngineConfig,
}

impl CollaborativeRecommender {
    /// Index `ratings` against `catalog`. Ratings for unknown items and
    /// non-finite or negative scores are ignored; when a user rated the
    /// same item more than once the most recent rating is kept.
    pub fn new(
        catalog: Catalog,
        ratings: impl IntoIterator<Item = Rating>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let catalog = match config.subset_size {
            Some(n) if n < catalog.len() => catalog.subset(n)?,
            _ => catalog,
        };

        let mut latest: AHashMap<(u64, usize), (i64, f32)> = AHashMap::new();
        for r in ratings {
            if !r.rating.is_finite() || r.rating < 0.0 {
                continue;
            }
            let Some(row) = catalog.index_of_id(r.item_id) else {
                continue;
            };
            latest
                .entry((r.user_id, row))
                .and_modify(|seen| {
                    if r.timestamp >= seen.0 {
                        *seen = (r.timestamp, r.rating);
                    }
                })
                .or_insert((r.timestamp, r.rating));
        }

        let mut entries: Vec<((u64, usize), f32)> = latest
            .into_iter()
            .map(|(key, (_, rating))| (key, rating))
            .collect();
        // Stable slot assignment and accumulation order
        entries.sort_unstable_by_key(|(key, _)| *key);

        let mut user_slots: AHashMap<u64, usize> = AHashMap::new();
        let mut item_ratings = vec![Vec::new(); catalog.len()];
        let mut user_ratings: Vec<Vec<(usize, f32)>> = Vec::new();
        for ((user_id, row), rating) in entries {
            let slot = *user_slots.entry(user_id).or_insert_with(|| {
                user_ratings.push(Vec::new());
                user_ratings.len() - 1
            });
            item_ratings[row].push((slot, rating));
            user_ratings[slot].push((row, rating));
        }

        let norms = item_ratings
            .iter()
            .map(|ratings| ratings.iter().map(|(_, r)| r * r).sum::<f32>().sqrt())
            .collect();

        Ok(Self {
            catalog,
            item_ratings,
            user_ratings,
            norms,
            config,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn user_count(&self) -> usize {
        self.user_ratings.len()
    }

    pub fn rating_count(&self) -> usize {
        self.item_ratings.iter().map(Vec::len).sum()
    }

    /// Cosine similarity of one item to every catalog row
    pub fn similarity_row(&self, seed: usize) -> Vec<f32> {
        let mut row = vec![0.0f32; self.catalog.len()];
        let seed_norm = self.norms[seed];
        if seed_norm == 0.0 {
            return row;
        }

        for &(user, seed_rating) in &self.item_ratings[seed] {
            for &(other, rating) in &self.user_ratings[user] {
                row[other] += seed_rating * rating;
            }
        }

        for (j, score) in row.iter_mut().enumerate() {
            let norm = self.norms[j];
            *score = if j == seed {
                1.0
            } else if norm == 0.0 {
                0.0
            } else {
                (*score / (seed_norm * norm)).clamp(0.0, 1.0)
            };
        }
        row
    }

    /// Ranked candidates for already-resolved seed rows
    pub fn recommend_indexes(&self, seeds: &[usize], top_n: usize) -> Vec<Candidate> {
        let seeds = unique_seeds(seeds);
        let rows: Vec<Vec<f32>> = seeds.par_iter().map(|&s| self.similarity_row(s)).collect();
        merge_rankings(&rows, &seeds, top_n, self.config.candidate_pool)
    }

    pub fn collab_model<S: AsRef<str>>(&self, titles: &[S], top_n: usize) -> Result<Vec<String>> {
        let request = RecommendationRequest::new(titles, top_n)?;
        self.recommend(&request)
    }
}

impl Recommender for CollaborativeRecommender {
    fn name(&self) -> &'static str {
        "collaborative"
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
