//! CSV loaders for the CineRank catalog and ratings.

pub mod catalog;
pub mod ratings;

pub use catalog::{title_list, CatalogLoader};
pub use ratings::RatingsLoader;
