//! Candidate profile assembly from raw resume text

use crate::config::ExtractionConfig;
use crate::error::{RecommenderError, Result};
use crate::processing::attributes::{AttributeExtractor, ExperienceYears};
use crate::processing::catalog::SkillCatalog;
use crate::processing::entities::{EntityRecognizer, NoopRecognizer};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::sections::{SectionKind, SectionSegmenter};
use crate::processing::skills::SkillExtractor;
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_MIN_TEXT_LENGTH: usize = 10;

/// Structured facts extracted from one resume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    #[serde(rename = "Skills")]
    pub skills: Vec<String>,
    #[serde(rename = "Batch_Year")]
    pub batch_year: Option<String>,
    #[serde(rename = "Experience")]
    pub experience: ExperienceYears,
}

impl CandidateProfile {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.batch_year.is_none()
            && self.experience == ExperienceYears::NotStated
    }
}

pub struct ProfileBuilder {
    normalizer: TextNormalizer,
    segmenter: SectionSegmenter,
    skills: Arc<SkillExtractor>,
    attributes: AttributeExtractor,
    min_text_length: usize,
}

impl ProfileBuilder {
    pub fn new(skills: Arc<SkillExtractor>) -> Self {
        let preserved = ExtractionConfig::default().preserve_symbols;
        Self {
            normalizer: TextNormalizer::new().with_preserved_symbols(&preserved),
            segmenter: SectionSegmenter::new(),
            skills,
            attributes: AttributeExtractor::new(),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Builder over the configured catalog (built-in unless a catalog file is
    /// set), without an entity recognizer backend
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::from_config_with_recognizer(config, Arc::new(NoopRecognizer))
    }

    pub fn from_config_with_recognizer(
        config: &ExtractionConfig,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Result<Self> {
        let catalog = match &config.skill_catalog {
            Some(path) => SkillCatalog::from_toml_file(path)?,
            None => SkillCatalog::builtin(),
        };
        debug!("Skill catalog has {} entries", catalog.len());

        let extractor = SkillExtractor::with_recognizer(
            Arc::new(catalog),
            recognizer,
            config.variant_min_similarity,
        )?;

        Ok(Self::new(Arc::new(extractor))
            .with_min_text_length(config.min_text_length)
            .with_preserved_symbols(&config.preserve_symbols))
    }

    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    pub fn with_preserved_symbols(mut self, symbols: &str) -> Self {
        self.normalizer = TextNormalizer::new().with_preserved_symbols(symbols);
        self
    }

    pub fn skill_extractor(&self) -> &Arc<SkillExtractor> {
        &self.skills
    }

    pub fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    /// Build a profile; text too short to analyze yields an empty profile
    pub fn build_profile(&self, text: &str) -> CandidateProfile {
        self.try_build_profile(text).unwrap_or_else(|e| {
            debug!("Returning empty profile: {}", e);
            CandidateProfile::default()
        })
    }

    /// Like [`build_profile`](Self::build_profile) but reports short input as
    /// [`RecommenderError::InputTooShort`]
    pub fn try_build_profile(&self, text: &str) -> Result<CandidateProfile> {
        let length = text.trim().chars().count();
        if length < self.min_text_length {
            return Err(RecommenderError::InputTooShort {
                length,
                minimum: self.min_text_length,
            });
        }

        let normalized = self.normalizer.normalize(text);
        let document = normalized.original.as_str();

        let skills_section = self.segmenter.section(document, SectionKind::Skills);
        let education_section = self.segmenter.section(document, SectionKind::Education);
        debug!(
            "Skills section: {}, education section: {}",
            skills_section.as_ref().map_or("absent", |s| s.matched_heading.as_str()),
            education_section.as_ref().map_or("absent", |s| s.matched_heading.as_str()),
        );

        let skills_source = skills_section.as_ref().map_or(document, |s| s.body.as_str());
        let skills = self.skills.extract_skills(skills_source);

        let education = education_section.as_ref().map(|s| s.body.as_str());
        let batch_year = self
            .attributes
            .extract_batch_year(education.unwrap_or(document), education);

        let experience = self.attributes.extract_experience(document);

        info!(
            "Extracted {} skills, batch year {:?}, experience {}",
            skills.len(),
            batch_year,
            experience
        );

        Ok(CandidateProfile {
            skills,
            batch_year,
            experience,
        })
    }
}
