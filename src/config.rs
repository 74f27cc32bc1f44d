//! Configuration management for the resume recommender

use crate::error::{RecommenderError, Result};
use crate::ranking::RankingPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Trimmed input shorter than this yields an empty profile
    pub min_text_length: usize,
    /// Symbols kept by the normalizer so terms like "C++" and "Ci/Cd" survive
    pub preserve_symbols: String,
    pub variant_min_similarity: f64,
    /// Optional TOML file replacing the built-in skill catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub top_n: usize,
    pub policy: RankingPolicy,
    /// Placeholder titles dropped from the job catalog before ranking
    pub excluded_titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    /// Recommendations shown by the console formatter
    pub display_limit: usize,
    /// Matching skills listed per recommendation before "...and N more"
    pub matching_preview: usize,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_length: 10,
            preserve_symbols: "+#/&".to_string(),
            variant_min_similarity: 0.5,
            skill_catalog: None,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            policy: RankingPolicy::Auto,
            excluded_titles: vec![
                "No additional information found".to_string(),
                "No additional information".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            display_limit: 7,
            matching_preview: 5,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`. A missing
    /// file is created with the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RecommenderError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            log::info!("Wrote default configuration to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RecommenderError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-recommender")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranking.top_n == 0 {
            return Err(RecommenderError::Configuration(
                "ranking.top_n must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.extraction.variant_min_similarity) {
            return Err(RecommenderError::Configuration(format!(
                "extraction.variant_min_similarity must be within 0..=1, got {}",
                self.extraction.variant_min_similarity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.extraction.min_text_length, 10);
        assert_eq!(config.extraction.preserve_symbols, "+#/&");
        assert_eq!(config.ranking.top_n, 10);
        assert_eq!(config.ranking.policy, RankingPolicy::Auto);
        assert_eq!(config.ranking.excluded_titles.len(), 2);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert_eq!(config.output.display_limit, 7);
        assert_eq!(config.output.matching_preview, 5);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.top_n = 3;
        config.ranking.policy = RankingPolicy::Ratio;
        config.output.format = OutputFormat::Json;
        config.extraction.skill_catalog = Some(PathBuf::from("/tmp/skills.toml"));
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.top_n = 0;
        config.save_to(&path).unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(RecommenderError::Configuration(_))));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(RecommenderError::Configuration(_))));
    }
}
