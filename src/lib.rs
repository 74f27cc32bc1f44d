//! Resume recommender library
//!
//! Turns resume text into a [`CandidateProfile`](processing::CandidateProfile)
//! (skills, batch year, experience) and ranks a job catalog against it.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod ranking;
pub mod service;

pub use config::Config;
pub use error::{RecommenderError, Result};
pub use processing::{CandidateProfile, ProfileBuilder, SkillCatalog, SkillExtractor};
pub use ranking::{JobCatalog, Recommendation, RecommendationEngine};
pub use service::{ResumeAnalysis, ResumeRecommender};
