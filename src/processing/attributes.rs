//! Graduation year and experience inference from resume text

use regex::Regex;
use serde::{Serialize, Serializer};

/// Years of experience as stated in the resume. `Fresher` and `NotStated`
/// both collapse to zero in [`ExperienceYears::years`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceYears {
    Stated(u32),
    Fresher,
    #[default]
    NotStated,
}

impl ExperienceYears {
    pub fn years(&self) -> u32 {
        match self {
            ExperienceYears::Stated(years) => *years,
            ExperienceYears::Fresher | ExperienceYears::NotStated => 0,
        }
    }

    pub fn is_stated(&self) -> bool {
        matches!(self, ExperienceYears::Stated(_))
    }
}

impl Serialize for ExperienceYears {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.years())
    }
}

impl std::fmt::Display for ExperienceYears {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceYears::Stated(1) => write!(f, "1 year"),
            ExperienceYears::Stated(years) => write!(f, "{} years", years),
            ExperienceYears::Fresher => write!(f, "Fresher"),
            ExperienceYears::NotStated => write!(f, "Not stated"),
        }
    }
}

/// Ordered year patterns, most specific first. Each captures the year in
/// group 1; years are ASCII digits only.
const BATCH_YEAR_PATTERNS: &[&str] = &[
    r"batch of (20[0-9]{2})",
    r"class of (20[0-9]{2})",
    r"(20[0-9]{2})\s*graduate",
    r"graduating\s*in\s*(20[0-9]{2})",
    r"expected graduation:?\s*(20[0-9]{2})",
    r"graduation year:?\s*(20[0-9]{2})",
    r"b\.?tech\.?\s*\(?\s*(20[0-9]{2})",
    r"b\.?e\.?\s*\(?\s*(20[0-9]{2})",
    r"completed in (20[0-9]{2})",
    r"passed.{1,20}?(20[0-9]{2})",
    r"degree.{1,30}?(20[0-9]{2})",
    r"education.{1,50}?(20[0-9]{2})",
    r"graduated.{1,20}(20[0-9]{2})",
    r"passing.{1,20}(20[0-9]{2})",
    r"\b(20[0-9]{2})\b",
];

pub struct AttributeExtractor {
    batch_patterns: Vec<Regex>,
    bare_year: Regex,
    experience: Regex,
    fresher: Regex,
}

impl Default for AttributeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeExtractor {
    pub fn new() -> Self {
        let batch_patterns = BATCH_YEAR_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("Invalid batch year regex"))
            .collect();

        let bare_year = Regex::new(r"\b(20[0-9]{2})\b").expect("Invalid year regex");

        let experience = Regex::new(r"(?i)([0-9]+)\+?\s*(?:years|yrs)")
            .expect("Invalid experience regex");

        let fresher = Regex::new(r"(?i)fresher").expect("Invalid fresher regex");

        Self {
            batch_patterns,
            bare_year,
            experience,
            fresher,
        }
    }

    /// First capture of the pattern cascade over the lowercased text. Falls
    /// back to the latest 20xx year in the education section, which may pick
    /// up a non-graduation year when several are listed.
    pub fn extract_batch_year(&self, text: &str, education: Option<&str>) -> Option<String> {
        let lowered = text.to_lowercase();

        for pattern in &self.batch_patterns {
            if let Some(year) = pattern.captures(&lowered).and_then(|c| c.get(1)) {
                return Some(year.as_str().to_string());
            }
        }

        let education = education?;
        self.bare_year
            .captures_iter(education)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .max()
            .map(str::to_string)
    }

    /// First "<N> years" / "<N>+ yrs" mention; otherwise "fresher"; otherwise
    /// not stated.
    pub fn extract_experience(&self, text: &str) -> ExperienceYears {
        if let Some(captures) = self.experience.captures(text) {
            return match captures[1].parse() {
                Ok(years) => ExperienceYears::Stated(years),
                Err(_) => {
                    log::debug!("Ignoring out-of-range experience value '{}'", &captures[1]);
                    ExperienceYears::NotStated
                }
            };
        }

        if self.fresher.is_match(text) {
            return ExperienceYears::Fresher;
        }

        ExperienceYears::NotStated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_pattern_wins() {
        let extractor = AttributeExtractor::new();
        let text = "Joined in 2024 as an intern. Batch of 2021 from XYZ college.";

        assert_eq!(extractor.extract_batch_year(text, None), Some("2021".to_string()));
    }

    #[test]
    fn test_degree_patterns() {
        let extractor = AttributeExtractor::new();

        assert_eq!(extractor.extract_batch_year("B.Tech 2022", None), Some("2022".to_string()));
        assert_eq!(
            extractor.extract_batch_year("B.Tech (2019 - 2023) Computer Science", None),
            Some("2019".to_string())
        );
        assert_eq!(
            extractor.extract_batch_year("Expected Graduation: 2025", None),
            Some("2025".to_string())
        );
        assert_eq!(
            extractor.extract_batch_year("Class of 2020, graduating in 2021", None),
            Some("2020".to_string())
        );
    }

    #[test]
    fn test_bare_year_fallback() {
        let extractor = AttributeExtractor::new();

        assert_eq!(
            extractor.extract_batch_year("Worked at Acme from 2018 to 2020", None),
            Some("2018".to_string())
        );
        assert_eq!(extractor.extract_batch_year("Graduated in 1999", None), None);
    }

    #[test]
    fn test_non_ascii_digits_are_not_years() {
        let extractor = AttributeExtractor::new();

        assert_eq!(extractor.extract_batch_year("batch of 20\u{0662}\u{0662}", None), None);
        assert_eq!(
            extractor.extract_batch_year("university", Some("graduated 20\u{0662}\u{0662}")),
            None
        );
    }

    #[test]
    fn test_education_section_max_year() {
        let extractor = AttributeExtractor::new();
        let education = "St. Mary School 2014\nUniversity 2017 2021";

        assert_eq!(
            extractor.extract_batch_year("no year mentioned", Some(education)),
            Some("2021".to_string())
        );
        assert_eq!(extractor.extract_batch_year("no year", Some("none here")), None);
    }

    #[test]
    fn test_experience() {
        let extractor = AttributeExtractor::new();

        assert_eq!(extractor.extract_experience("5+ years of Rust"), ExperienceYears::Stated(5));
        assert_eq!(extractor.extract_experience("3 yrs at Acme, 2 years at Beta"), ExperienceYears::Stated(3));
        assert_eq!(extractor.extract_experience("10 YEARS"), ExperienceYears::Stated(10));
        assert_eq!(extractor.extract_experience("I am a Fresher"), ExperienceYears::Fresher);
        assert_eq!(extractor.extract_experience("Student"), ExperienceYears::NotStated);
    }

    #[test]
    fn test_experience_collapses_to_zero() {
        assert_eq!(ExperienceYears::Fresher.years(), 0);
        assert_eq!(ExperienceYears::NotStated.years(), 0);
        assert_eq!(ExperienceYears::Stated(0).years(), 0);
        assert!(ExperienceYears::Stated(0).is_stated());

        let json = serde_json::to_string(&ExperienceYears::Stated(4)).unwrap();
        assert_eq!(json, "4");
        assert_eq!(ExperienceYears::Stated(4).to_string(), "4 years");
    }
}
