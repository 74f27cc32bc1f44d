//! Two-stage job ranking: term-vector cosine similarity with a skill-overlap
//! ratio fallback

use crate::config::RankingConfig;
use crate::ranking::jobs::{JobCatalog, JobRecord, SENTINEL_TITLES};
use crate::ranking::vectorizer::{CountVectorizer, VectorizeError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_TOP_N: usize = 10;

/// Similarity function that produced a whole result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMethod {
    Vector,
    Ratio,
}

impl std::fmt::Display for RankingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingMethod::Vector => write!(f, "cosine similarity"),
            RankingMethod::Ratio => write!(f, "skill overlap ratio"),
        }
    }
}

/// `Auto` tries the vector method first; `Ratio` skips it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPolicy {
    #[default]
    Auto,
    Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    /// Percentage in (0, 100], two decimals
    pub similarity_score: f64,
    pub matching_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub method: RankingMethod,
    pub recommendations: Vec<Recommendation>,
}

impl Ranking {
    fn empty(method: RankingMethod) -> Self {
        Self {
            method,
            recommendations: Vec::new(),
        }
    }
}

/// Cosine similarity between the candidate's joined skills and each job's
/// joined skills, over a vocabulary fitted on all of them
#[derive(Default)]
pub struct VectorRanker {
    vectorizer: CountVectorizer,
}

impl VectorRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, skills: &[String], jobs: &[&JobRecord]) -> Result<Vec<Recommendation>, VectorizeError> {
        let candidate_text = skills.join(" ").to_lowercase();

        // Candidate first, then one document per job
        let mut documents = Vec::with_capacity(jobs.len() + 1);
        documents.push(candidate_text.clone());
        documents.extend(jobs.iter().map(|job| job.skills_text()));

        let vectors = self.vectorizer.fit_transform(&documents)?;
        let (candidate, job_vectors) = vectors.split_first().ok_or(VectorizeError::EmptyVocabulary)?;
        if candidate.is_zero() {
            return Err(VectorizeError::DegenerateCandidate);
        }

        // Matching skills are job tokens the candidate also lists
        let candidate_tokens: BTreeSet<&str> = candidate_text.split_whitespace().collect();

        let recommendations = jobs
            .iter()
            .zip(job_vectors)
            .zip(&documents[1..])
            .filter_map(|((job, vector), job_text)| {
                let score = to_score(candidate.cosine(vector))?;
                let matching_skills = job_text
                    .split_whitespace()
                    .filter(|token| candidate_tokens.contains(token))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(str::to_string)
                    .collect();

                Some(Recommendation {
                    title: job.title.clone(),
                    similarity_score: score,
                    matching_skills,
                })
            })
            .collect();

        Ok(recommendations)
    }
}

/// Shared whole skills over the larger of the two skill sets
#[derive(Debug, Default)]
pub struct RatioRanker;

impl RatioRanker {
    pub fn score(&self, skills: &[String], jobs: &[&JobRecord]) -> Vec<Recommendation> {
        let candidate: BTreeSet<String> = skills.iter().map(|s| s.to_lowercase()).collect();

        jobs.iter()
            .filter_map(|job| {
                let required: BTreeSet<String> = job.required_skills.iter().map(|s| s.to_lowercase()).collect();
                let matching: Vec<String> = candidate.intersection(&required).cloned().collect();
                if matching.is_empty() {
                    return None;
                }

                let ratio = matching.len() as f64 / candidate.len().max(required.len()) as f64;
                let score = to_score(ratio)?;

                Some(Recommendation {
                    title: job.title.clone(),
                    similarity_score: score,
                    matching_skills: matching,
                })
            })
            .collect()
    }
}

/// Percentage rounded to two decimals; `None` when it rounds to zero
fn to_score(similarity: f64) -> Option<f64> {
    let score = ((similarity * 100.0 * 100.0).round() / 100.0).min(100.0);
    (score > 0.0).then_some(score)
}

pub struct RecommendationEngine {
    vector: VectorRanker,
    ratio: RatioRanker,
    policy: RankingPolicy,
    excluded_titles: Vec<String>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            vector: VectorRanker::new(),
            ratio: RatioRanker,
            policy: RankingPolicy::Auto,
            excluded_titles: SENTINEL_TITLES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new()
            .with_policy(config.policy)
            .with_excluded_titles(config.excluded_titles.clone())
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_excluded_titles(mut self, titles: Vec<String>) -> Self {
        self.excluded_titles = titles;
        self
    }

    pub fn policy(&self) -> RankingPolicy {
        self.policy
    }

    /// Top `top_n` recommendations, best first
    pub fn recommend(&self, skills: &[String], catalog: &JobCatalog, top_n: usize) -> Vec<Recommendation> {
        self.rank(skills, catalog, top_n).recommendations
    }

    /// Rank the catalog against `skills`. One similarity function scores the
    /// whole result; ties keep catalog order.
    pub fn rank(&self, skills: &[String], catalog: &JobCatalog, top_n: usize) -> Ranking {
        let preferred = match self.policy {
            RankingPolicy::Auto => RankingMethod::Vector,
            RankingPolicy::Ratio => RankingMethod::Ratio,
        };
        if skills.is_empty() {
            debug!("No skills to rank against");
            return Ranking::empty(preferred);
        }

        let jobs: Vec<&JobRecord> = catalog.ranked_records(&self.excluded_titles).collect();
        debug!("Ranking {} of {} jobs", jobs.len(), catalog.len());

        let (method, mut recommendations) = match self.policy {
            RankingPolicy::Ratio => (RankingMethod::Ratio, self.ratio.score(skills, &jobs)),
            RankingPolicy::Auto => match self.vector.score(skills, &jobs) {
                Ok(recommendations) => (RankingMethod::Vector, recommendations),
                Err(e) => {
                    warn!("Vector similarity unavailable ({}); using skill overlap ratio", e);
                    (RankingMethod::Ratio, self.ratio.score(skills, &jobs))
                }
            },
        };

        recommendations.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        recommendations.truncate(top_n);

        Ranking {
            method,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn assert_matching_within_skills(skills: &[String], recommendations: &[Recommendation]) {
        let tokens: BTreeSet<String> = skills
            .iter()
            .flat_map(|s| s.to_lowercase().split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .chain(skills.iter().map(|s| s.to_lowercase()))
            .collect();
        for rec in recommendations {
            for skill in &rec.matching_skills {
                assert!(tokens.contains(skill), "{} not among candidate skills", skill);
            }
        }
    }

    fn sample_catalog() -> JobCatalog {
        JobCatalog::from_rows(vec![
            ("Data Scientist", "python,sql,machine learning"),
            ("Frontend Developer", "react,html,css"),
        ])
    }

    #[test]
    fn test_vector_ranking() {
        let engine = RecommendationEngine::new();
        let ranking = engine.rank(&skills(&["Python", "Sql"]), &sample_catalog(), DEFAULT_TOP_N);

        assert_eq!(ranking.method, RankingMethod::Vector);
        assert_eq!(ranking.recommendations.len(), 1);

        let top = &ranking.recommendations[0];
        assert_eq!(top.title, "Data Scientist");
        assert_eq!(top.similarity_score, 70.71);
        assert_eq!(top.matching_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_ratio_policy() {
        let engine = RecommendationEngine::new().with_policy(RankingPolicy::Ratio);
        let ranking = engine.rank(&skills(&["python", "sql"]), &sample_catalog(), DEFAULT_TOP_N);

        assert_eq!(ranking.method, RankingMethod::Ratio);
        assert_eq!(ranking.recommendations.len(), 1);
        assert_eq!(ranking.recommendations[0].similarity_score, 66.67);
        assert_eq!(ranking.recommendations[0].matching_skills, vec!["python", "sql"]);
        assert_matching_within_skills(&skills(&["python", "sql"]), &ranking.recommendations);
    }

    #[test]
    fn test_empty_skills() {
        let engine = RecommendationEngine::new();
        assert!(engine.recommend(&[], &sample_catalog(), DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_degenerate_candidate_falls_back_to_ratio() {
        let catalog = JobCatalog::from_rows(vec![("Systems Programmer", "c,c++"), ("Web Developer", "javascript")]);
        let engine = RecommendationEngine::new();

        let ranking = engine.rank(&skills(&["C"]), &catalog, DEFAULT_TOP_N);

        assert_eq!(ranking.method, RankingMethod::Ratio);
        assert_eq!(ranking.recommendations.len(), 1);
        assert_eq!(ranking.recommendations[0].title, "Systems Programmer");
        assert_eq!(ranking.recommendations[0].similarity_score, 50.0);
    }

    #[test]
    fn test_empty_vocabulary_falls_back_to_ratio() {
        let catalog = JobCatalog::from_rows(vec![("Sys", "c,r"), ("Stats", "r")]);
        let engine = RecommendationEngine::new();
        let candidate = skills(&["C", "R"]);

        let ranking = engine.rank(&candidate, &catalog, DEFAULT_TOP_N);

        assert_eq!(ranking.method, RankingMethod::Ratio);
        let scored: Vec<(&str, f64)> = ranking
            .recommendations
            .iter()
            .map(|r| (r.title.as_str(), r.similarity_score))
            .collect();
        assert_eq!(scored, vec![("Sys", 100.0), ("Stats", 50.0)]);
        assert_eq!(ranking.recommendations[0].matching_skills, vec!["c", "r"]);
        assert_matching_within_skills(&candidate, &ranking.recommendations);
    }

    #[test]
    fn test_sentinel_rows_excluded() {
        let catalog = JobCatalog::from_rows(vec![
            ("No additional information found", "python,sql"),
            ("Analyst", "sql"),
        ]);
        let engine = RecommendationEngine::new();

        let titles: Vec<String> = engine
            .recommend(&skills(&["Sql"]), &catalog, DEFAULT_TOP_N)
            .into_iter()
            .map(|r| r.title)
            .collect();

        assert_eq!(titles, vec!["Analyst"]);
    }

    #[test]
    fn test_sorted_bounded_and_stable() {
        let catalog = JobCatalog::from_rows(vec![
            ("First Tie", "python"),
            ("Best", "python,docker"),
            ("Second Tie", "python"),
            ("Unrelated", "cobol"),
        ]);
        let engine = RecommendationEngine::new();
        let ranking = engine.rank(&skills(&["Python", "Docker"]), &catalog, DEFAULT_TOP_N);

        let titles: Vec<&str> = ranking.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Best", "First Tie", "Second Tie"]);

        for pair in ranking.recommendations.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
        for rec in &ranking.recommendations {
            assert!(rec.similarity_score > 0.0 && rec.similarity_score <= 100.0);
        }
        assert_eq!(ranking.recommendations[0].similarity_score, 100.0);
        assert_matching_within_skills(&skills(&["Python", "Docker"]), &ranking.recommendations);

        let truncated = engine.recommend(&skills(&["Python", "Docker"]), &catalog, 2);
        assert_eq!(truncated.len(), 2);
    }

    #[test]
    fn test_recommendation_wire_names() {
        let rec = Recommendation {
            title: "Data Scientist".to_string(),
            similarity_score: 70.71,
            matching_skills: vec!["python".to_string()],
        };
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["title"], "Data Scientist");
        assert_eq!(json["similarity_score"], 70.71);
        assert_eq!(json["matching_skills"][0], "python");
    }
}
