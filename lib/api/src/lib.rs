//! HTTP boundary for CineRank.
//!
//! Exposes the three-seed call contract of both recommenders as JSON over
//! REST and maps engine errors to status codes.

pub mod error;
pub mod rest;
pub mod state;

pub use error::ApiError;
pub use rest::{configure, RestApi};
pub use state::{AppState, DataSources, Engines};
