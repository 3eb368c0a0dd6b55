// Recommendation engine: profile normalization, catalog, scoring and ranking.
// Everything except `handlers` is pure and synchronous.

pub mod catalog;
pub mod handlers;
pub mod profile;
pub mod recommender;
pub mod scoring;
