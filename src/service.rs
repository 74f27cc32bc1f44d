//! End-to-end analysis: resume text to profile and ranked jobs

use crate::config::Config;
use crate::error::{RecommenderError, Result};
use crate::processing::profile::{CandidateProfile, ProfileBuilder};
use crate::ranking::{JobCatalog, RankingMethod, Recommendation, RecommendationEngine};
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub extracted_info: CandidateProfile,
    pub recommended_jobs: Vec<Recommendation>,
    pub ranking_method: RankingMethod,
}

pub struct ResumeRecommender {
    profiles: ProfileBuilder,
    engine: RecommendationEngine,
    top_n: usize,
}

impl ResumeRecommender {
    pub fn new(profiles: ProfileBuilder, engine: RecommendationEngine, top_n: usize) -> Self {
        Self {
            profiles,
            engine,
            top_n,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ProfileBuilder::from_config(&config.extraction)?,
            RecommendationEngine::from_config(&config.ranking),
            config.ranking.top_n,
        ))
    }

    pub fn profile_builder(&self) -> &ProfileBuilder {
        &self.profiles
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn default_top_n(&self) -> usize {
        self.top_n
    }

    /// Profile only; short input is an error rather than an empty profile
    pub fn parse(&self, text: &str) -> Result<CandidateProfile> {
        self.profiles.try_build_profile(text)
    }

    /// Profile plus ranked recommendations. Fails with `InputTooShort` for
    /// degenerate text and `NoSkillsDetected` when no catalog skill is found.
    pub fn analyze(&self, text: &str, jobs: &JobCatalog, top_n: Option<usize>) -> Result<ResumeAnalysis> {
        let profile = self.profiles.try_build_profile(text)?;
        if profile.skills.is_empty() {
            return Err(RecommenderError::NoSkillsDetected);
        }

        let ranking = self
            .engine
            .rank(&profile.skills, jobs, top_n.unwrap_or(self.top_n));
        info!(
            "Ranked {} recommendations by {}",
            ranking.recommendations.len(),
            ranking.method
        );

        Ok(ResumeAnalysis {
            extracted_info: profile,
            recommended_jobs: ranking.recommendations,
            ranking_method: ranking.method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::RankingPolicy;

    fn jobs() -> JobCatalog {
        JobCatalog::from_rows(vec![
            ("Data Scientist", "python,sql,machine learning"),
            ("Frontend Developer", "react,html,css"),
            ("No additional information found", "python,sql"),
        ])
    }

    #[test]
    fn test_analyze() {
        let recommender = ResumeRecommender::from_config(&Config::default()).unwrap();
        let text = "SKILLS\nPython, SQL\nEDUCATION\nB.Tech 2022\n3 years of experience";

        let analysis = recommender.analyze(text, &jobs(), None).unwrap();

        assert_eq!(analysis.extracted_info.skills, vec!["Python", "Sql"]);
        assert_eq!(analysis.ranking_method, RankingMethod::Vector);
        assert_eq!(analysis.recommended_jobs.len(), 1);
        assert_eq!(analysis.recommended_jobs[0].title, "Data Scientist");

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["extractedInfo"]["Batch_Year"], "2022");
        assert_eq!(json["recommendedJobs"][0]["similarity_score"], 70.71);
        assert_eq!(json["rankingMethod"], "vector");
    }

    #[test]
    fn test_analyze_errors_are_user_actionable() {
        let recommender = ResumeRecommender::from_config(&Config::default()).unwrap();

        let short = recommender.analyze("hi", &jobs(), None).unwrap_err();
        assert!(matches!(short, RecommenderError::InputTooShort { .. }));
        assert!(short.is_user_actionable());

        let no_skills = recommender
            .analyze("Enjoys long walks on the beach and gardening.", &jobs(), None)
            .unwrap_err();
        assert!(matches!(no_skills, RecommenderError::NoSkillsDetected));
        assert!(no_skills.is_user_actionable());
    }

    #[test]
    fn test_ratio_policy_from_config() {
        let mut config = Config::default();
        config.ranking.policy = RankingPolicy::Ratio;
        config.ranking.top_n = 1;
        let recommender = ResumeRecommender::from_config(&config).unwrap();

        let analysis = recommender
            .analyze("SKILLS\nPython, SQL, React", &jobs(), None)
            .unwrap();

        assert_eq!(analysis.ranking_method, RankingMethod::Ratio);
        assert_eq!(analysis.recommended_jobs.len(), 1);
        assert_eq!(analysis.recommended_jobs[0].title, "Data Scientist");
    }
}
