//! # CineRank Core
//!
//! Core library for the CineRank movie recommender.
//!
//! This crate provides the data model and the ranking algorithms:
//!
//! - [`Catalog`] - Immutable item table with exact-title resolution
//! - [`FeatureBuilder`] - Bag-of-categories vectors over the tag vocabulary
//! - [`SimilarityIndex`] - Cosine similarity, dense or computed per row
//! - [`merge_rankings`] - Per-seed rankings merged into one top-N list
//! - [`ContentRecommender`] / [`CollaborativeRecommender`] - The two
//!   interchangeable [`Recommender`] strategies
//!
//! ## Example
//!
//! ```rust
//! use cinerank_core::{Catalog, ContentRecommender, EngineConfig, Item};
//!
//! let items = [
//!     (1, "A", "X"),
//!     (2, "B", "X"),
//!     (3, "C", "Y"),
//!     (4, "D", "X|Y"),
//! ]
//! .into_iter()
//! .filter_map(|(id, title, tags)| Item::from_tag_string(id, title, tags, '|'));
//!
//! let catalog = Catalog::from_items(items).unwrap();
//! let engine = ContentRecommender::new(catalog, EngineConfig::default()).unwrap();
//!
//! let titles = engine.content_model(&["A", "B", "C"], 1).unwrap();
//! assert_eq!(titles, vec!["D"]);
//! ```

pub mod catalog;
pub mod collaborative;
pub mod config;
pub mod content;
pub mod error;
pub mod features;
pub mod item;
pub mod rank;
pub mod recommender;
pub mod similarity;
pub mod vector;

pub use catalog::Catalog;
pub use collaborative::{CollaborativeRecommender, Rating};
pub use config::{EngineConfig, DEFAULT_CANDIDATE_POOL, DEFAULT_DENSE_LIMIT};
pub use content::ContentRecommender;
pub use error::{Error, Result};
pub use features::{FeatureBuilder, FeatureSet, Vocabulary};
pub use item::{Item, ItemId};
pub use rank::{merge_rankings, rank_row, Candidate};
pub use recommender::{ModelKind, RecommendationRequest, Recommender, SEED_COUNT};
pub use similarity::{OnDemandSimilarity, SimilarityIndex, SimilarityMatrix};
pub use vector::Vector;
