//! Resume text processing: normalization, sections, skills and attributes

pub mod attributes;
pub mod catalog;
pub mod entities;
pub mod normalizer;
pub mod profile;
pub mod sections;
pub mod skills;

pub use attributes::ExperienceYears;
pub use catalog::SkillCatalog;
pub use profile::{CandidateProfile, ProfileBuilder};
pub use skills::SkillExtractor;
