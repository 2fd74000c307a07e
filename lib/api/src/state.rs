use cinerank_core::{
    CollaborativeRecommender, ContentRecommender, EngineConfig, ModelKind, Recommender, Result,
};
use cinerank_storage::{CatalogLoader, RatingsLoader};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;

/// The recommenders built from one catalog load
pub struct Engines {
    pub content: Arc<ContentRecommender>,
    pub collaborative: Option<Arc<CollaborativeRecommender>>,
}

impl Engines {
    pub fn new(
        content: ContentRecommender,
        collaborative: Option<CollaborativeRecommender>,
    ) -> Self {
        Self {
            content: Arc::new(content),
            collaborative: collaborative.map(Arc::new),
        }
    }

    pub fn recommender(&self, kind: ModelKind) -> std::result::Result<Arc<dyn Recommender>, ApiError> {
        match kind {
            ModelKind::Content => Ok(self.content.clone() as Arc<dyn Recommender>),
            ModelKind::Collaborative => self
                .collaborative
                .clone()
                .map(|c| c as Arc<dyn Recommender>)
                .ok_or(ApiError::ModelUnavailable(kind)),
        }
    }
}

/// Where the engines are (re)loaded from
#[derive(Debug, Clone)]
pub struct DataSources {
    pub catalog: PathBuf,
    pub ratings: Option<PathBuf>,
    pub config: EngineConfig,
}

impl DataSources {
    /// Load the catalog (and ratings if configured) and build every engine
    pub fn load(&self) -> Result<Engines> {
        let catalog = CatalogLoader::load(&self.catalog, &self.config)?;
        let collaborative = match &self.ratings {
            Some(path) => {
                let ratings = RatingsLoader::load(path)?;
                Some(CollaborativeRecommender::new(
                    catalog.clone(),
                    ratings,
                    self.config.clone(),
                )?)
            }
            None => None,
        };
        let content = ContentRecommender::new(catalog, self.config.clone())?;
        info!(
            items = content.catalog().len(),
            vocabulary = content.vocabulary().len(),
            dense_index = content.index().is_dense(),
            collaborative = collaborative.is_some(),
            "Engines built"
        );
        Ok(Engines::new(content, collaborative))
    }
}

/// Shared server state.
///
/// Requests take a snapshot of the current engines and rank without holding
/// the lock; a reload builds new engines first and then swaps the pointer.
pub struct AppState {
    engines: RwLock<Arc<Engines>>,
    sources: Option<DataSources>,
}

impl AppState {
    pub fn new(engines: Engines) -> Self {
        Self {
            engines: RwLock::new(Arc::new(engines)),
            sources: None,
        }
    }

    pub fn from_sources(sources: DataSources) -> Result<Self> {
        let engines = sources.load()?;
        Ok(Self {
            engines: RwLock::new(Arc::new(engines)),
            sources: Some(sources),
        })
    }

    pub fn engines(&self) -> Arc<Engines> {
        self.engines.read().clone()
    }

    /// Rebuild engines from the configured sources. On failure the current
    /// engines stay in place.
    pub fn reload(&self) -> std::result::Result<Arc<Engines>, ApiError> {
        let sources = self.sources.as_ref().ok_or(ApiError::ReloadUnavailable)?;
        let engines = Arc::new(sources.load()?);
        *self.engines.write() = engines.clone();
        info!("Engines reloaded");
        Ok(engines)
    }
}
