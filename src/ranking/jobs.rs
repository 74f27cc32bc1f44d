//! Job catalog records as handed to the recommendation engine

use serde::{Deserialize, Serialize};

/// Titles used by job datasets as "no data" placeholders
pub const SENTINEL_TITLES: [&str; 2] = ["No additional information found", "No additional information"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    /// Lowercased, trimmed skill names in dataset order
    pub required_skills: Vec<String>,
}

impl JobRecord {
    pub fn new(title: impl Into<String>, skills_csv: &str) -> Self {
        Self {
            title: title.into(),
            required_skills: parse_skills_csv(skills_csv),
        }
    }

    /// Skills joined by spaces, the form the vectorizer sees
    pub fn skills_text(&self) -> String {
        self.required_skills.join(" ")
    }
}

/// Split a comma-separated skills field, optionally quote-wrapped
pub fn parse_skills_csv(skills_csv: &str) -> Vec<String> {
    skills_csv
        .replace('"', "")
        .split(',')
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCatalog {
    records: Vec<JobRecord>,
}

impl JobCatalog {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    /// Build from `(title, skills_csv)` rows, keeping row order
    pub fn from_rows<I, T, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: AsRef<str>,
    {
        let records = rows
            .into_iter()
            .map(|(title, skills)| JobRecord::new(title, skills.as_ref()))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose title is not one of `excluded`, in catalog order
    pub fn ranked_records<'a>(&'a self, excluded: &'a [String]) -> impl Iterator<Item = &'a JobRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| !excluded.iter().any(|title| title == &record.title))
    }
}
