//! Input processing module
//! Handles file detection, resume text extraction and job catalog loading

pub mod file_detector;
pub mod job_catalog;
pub mod manager;
pub mod text_extractor;

pub use job_catalog::JobCatalogLoader;
pub use manager::InputManager;
