//! Report structures shared by every output format

use crate::processing::profile::CandidateProfile;
use crate::ranking::{RankingMethod, Recommendation};
use crate::service::ResumeAnalysis;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything one command run produces. Profile and recommendation fields
/// keep the wire names consumed by API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub extracted_info: CandidateProfile,

    /// Absent for profile-only runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_jobs: Option<Vec<Recommendation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_method: Option<RankingMethod>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_catalog_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs_considered: Option<usize>,
    pub processing_time_ms: u64,
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_file: resume_file.into(),
            job_catalog_file: None,
            jobs_considered: None,
            processing_time_ms,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_job_catalog(mut self, file: impl Into<String>, jobs: usize) -> Self {
        self.job_catalog_file = Some(file.into());
        self.jobs_considered = Some(jobs);
        self
    }
}

impl AnalysisReport {
    pub fn from_profile(profile: CandidateProfile, metadata: ReportMetadata) -> Self {
        Self {
            extracted_info: profile,
            recommended_jobs: None,
            ranking_method: None,
            metadata,
        }
    }

    pub fn from_analysis(analysis: ResumeAnalysis, metadata: ReportMetadata) -> Self {
        Self {
            extracted_info: analysis.extracted_info,
            recommended_jobs: Some(analysis.recommended_jobs),
            ranking_method: Some(analysis.ranking_method),
            metadata,
        }
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.extracted_info
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        self.recommended_jobs.as_deref().unwrap_or_default()
    }

    pub fn has_recommendations(&self) -> bool {
        self.recommended_jobs.is_some()
    }

    pub fn top_match(&self) -> Option<&Recommendation> {
        self.recommendations().first()
    }
}
