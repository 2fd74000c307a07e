//! # CineRank
//!
//! Movie recommendations from three liked titles.
//!
//! Two interchangeable strategies share one call contract (three seed titles
//! in, up to `top_n` ranked titles out, seeds never returned, unknown titles
//! rejected):
//!
//! - **Content-based**: cosine similarity between bag-of-genre vectors
//! - **Collaborative**: item-item cosine similarity over user ratings
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cinerank --catalog movies.csv --ratings ratings.csv --http-port 8501
//! curl -XPOST localhost:8501/recommend \
//!     -H 'content-type: application/json' \
//!     -d '{"titles": ["Heat (1995)", "Casino (1995)", "Se7en (1995)"], "top_n": 10}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use cinerank::prelude::*;
//!
//! let config = EngineConfig::default();
//! let catalog = CatalogLoader::load("movies.csv", &config).unwrap();
//! let engine = ContentRecommender::new(catalog, config).unwrap();
//!
//! let titles = engine
//!     .content_model(&["Heat (1995)", "Casino (1995)", "Se7en (1995)"], 10)
//!     .unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - `cinerank-core` - Catalog, features, similarity index, rank merging, recommenders
//! - `cinerank-storage` - CSV catalog and ratings loaders
//! - `cinerank-api` - REST API

// Re-export core types
pub use cinerank_core::{
    Catalog, Item, ItemId, Rating,
    EngineConfig, ModelKind, RecommendationRequest, Recommender,
    ContentRecommender, CollaborativeRecommender,
    SimilarityIndex, SimilarityMatrix,
    Error, Result,
};

// Re-export storage
pub use cinerank_storage::{CatalogLoader, RatingsLoader};

// Re-export API
pub use cinerank_api::{AppState, DataSources, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, Item, ItemId, Rating,
        EngineConfig, ModelKind, RecommendationRequest, Recommender,
        ContentRecommender, CollaborativeRecommender,
        Error, Result,
        CatalogLoader, RatingsLoader,
        RestApi,
    };
}
