//! Job catalog loading from CSV (`job_title,skills`)

use crate::error::{RecommenderError, Result};
use crate::input::file_detector::FileType;
use crate::ranking::JobCatalog;
use log::{debug, info};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JobRow {
    job_title: String,
    #[serde(default)]
    skills: Option<String>,
}

pub struct JobCatalogLoader;

impl JobCatalogLoader {
    pub async fn load(path: &Path) -> Result<JobCatalog> {
        if FileType::from_path(path) != Some(FileType::Csv) {
            return Err(RecommenderError::UnsupportedFormat(format!(
                "Job catalog must be a CSV file: {}",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let catalog = Self::from_reader(bytes.as_slice())?;
        info!("Loaded {} jobs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse CSV with a header row containing `job_title` and `skills`.
    /// Rows with an empty title are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<JobCatalog> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<JobRow>() {
            let row = record?;
            let title = row.job_title.trim().to_string();
            if title.is_empty() {
                debug!("Skipping job row without a title");
                continue;
            }
            rows.push((title, row.skills.unwrap_or_default()));
        }

        Ok(JobCatalog::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader() {
        let data = "job_title,skills\nData Scientist,\"python, sql, machine learning\"\nFrontend Developer,\"React,HTML,CSS\"\n,python\nIntern,\n";
        let catalog = JobCatalogLoader::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.records()[0].required_skills,
            vec!["python", "sql", "machine learning"]
        );
        assert_eq!(catalog.records()[1].required_skills, vec!["react", "html", "css"]);
        assert!(catalog.records()[2].required_skills.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let data = "title,skills\nData Scientist,python\n";
        assert!(matches!(
            JobCatalogLoader::from_reader(data.as_bytes()),
            Err(RecommenderError::Csv(_))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_non_csv() {
        let result = JobCatalogLoader::load(Path::new("jobs.json")).await;
        assert!(matches!(result, Err(RecommenderError::UnsupportedFormat(_))));
    }
}
