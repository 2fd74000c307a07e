use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of liked titles a request is built from
pub const SEED_COUNT: usize = 3;

/// Three liked titles and the number of recommendations wanted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    seed_titles: [String; SEED_COUNT],
    top_n: usize,
}

impl RecommendationRequest {
    pub fn new<S: AsRef<str>>(titles: &[S], top_n: usize) -> Result<Self> {
        if titles.len() != SEED_COUNT {
            return Err(Error::InvalidRequest(format!(
                "expected {} seed titles, got {}",
                SEED_COUNT,
                titles.len()
            )));
        }
        if top_n == 0 {
            return Err(Error::InvalidRequest("top_n must be at least 1".to_string()));
        }

        Ok(Self {
            seed_titles: std::array::from_fn(|i| titles[i].as_ref().to_string()),
            top_n,
        })
    }

    pub fn seed_titles(&self) -> &[String; SEED_COUNT] {
        &self.seed_titles
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }
}

/// A ranking strategy. Given three seed titles it returns up to `top_n`
/// titles, never a seed, and fails with [`Error::TitlesNotFound`] when any
/// seed is not in the catalog.
pub trait Recommender: Send + Sync {
    fn name(&self) -> &'static str;

    fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Content,
    Collaborative,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Content => write!(f, "content"),
            ModelKind::Collaborative => write!(f, "collaborative"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "content" | "content-based" => Ok(ModelKind::Content),
            "collaborative" | "collab" | "collaborative-based" => Ok(ModelKind::Collaborative),
            other => Err(Error::InvalidRequest(format!("unknown model: {}", other))),
        }
    }
}
