//! Job recommendation: catalog records, vectorization and ranking

pub mod engine;
pub mod jobs;
pub mod vectorizer;

pub use engine::{
    Ranking, RankingMethod, RankingPolicy, Recommendation, RecommendationEngine, DEFAULT_TOP_N,
};
pub use jobs::{JobCatalog, JobRecord};
