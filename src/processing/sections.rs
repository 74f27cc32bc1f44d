//! Section segmentation: heading detection with synonym fallback

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    Education,
    Skills,
    Experience,
    Projects,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Projects,
    ];

    /// Canonical heading text
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Education => "EDUCATION",
            SectionKind::Skills => "SKILLS",
            SectionKind::Experience => "EXPERIENCE",
            SectionKind::Projects => "PROJECTS",
        }
    }

    /// Alternative headings, tried in order when the canonical one is absent
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Education => &[
                "ACADEMIC BACKGROUND",
                "EDUCATIONAL QUALIFICATIONS",
                "EDUCATION DETAILS",
                "QUALIFICATION",
            ],
            SectionKind::Skills => &[
                "TECHNICAL SKILLS",
                "CORE COMPETENCIES",
                "TECHNOLOGIES",
                "SKILL SET",
                "PROGRAMMING",
            ],
            SectionKind::Experience => &[
                "WORK EXPERIENCE",
                "PROFESSIONAL EXPERIENCE",
                "WORK HISTORY",
                "EMPLOYMENT",
            ],
            SectionKind::Projects => &[
                "PERSONAL PROJECTS",
                "ACADEMIC PROJECTS",
                "NOTABLE PROJECTS",
                "PORTFOLIO",
            ],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.heading().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Education => write!(f, "Education"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Projects => write!(f, "Projects"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Heading actually found in the document (canonical or synonym)
    pub matched_heading: String,
    pub body: String,
}

pub struct SectionSegmenter {
    all_caps_line: Regex,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        let all_caps_line = Regex::new(r"^[A-Z][A-Z ]+:?$").expect("Invalid heading regex");
        Self { all_caps_line }
    }

    /// Body text of the named section, or an empty string if absent.
    /// Names other than the four known kinds are matched without synonyms.
    pub fn get_section(&self, text: &str, section_name: &str) -> String {
        match SectionKind::from_name(section_name) {
            Some(kind) => self.section(text, kind).map(|s| s.body).unwrap_or_default(),
            None => self
                .find_under_heading(text, section_name)
                .unwrap_or_default(),
        }
    }

    /// Locate a section by its canonical heading, then by each synonym in
    /// order. A heading with an empty body counts as absent.
    pub fn section(&self, text: &str, kind: SectionKind) -> Option<Section> {
        std::iter::once(kind.heading())
            .chain(kind.synonyms().iter().copied())
            .find_map(|heading| {
                self.find_under_heading(text, heading).map(|body| Section {
                    name: kind.heading().to_string(),
                    matched_heading: heading.to_string(),
                    body,
                })
            })
    }

    /// All known sections present in the document
    pub fn segment(&self, text: &str) -> BTreeMap<SectionKind, Section> {
        SectionKind::ALL
            .into_iter()
            .filter_map(|kind| self.section(text, kind).map(|section| (kind, section)))
            .collect()
    }

    fn find_under_heading(&self, text: &str, heading: &str) -> Option<String> {
        let lines: Vec<&str> = text.lines().collect();

        for (idx, line) in lines.iter().enumerate() {
            let Some(rest) = strip_heading(line, heading) else {
                continue;
            };

            // Text after the heading on the same line belongs to the body
            let mut body_lines = Vec::new();
            let first = rest.trim().trim_start_matches(':').trim();
            if !first.is_empty() {
                body_lines.push(first);
            }

            // Collect lines until the next heading
            for next in lines.iter().skip(idx + 1) {
                if self.is_heading_line(next) {
                    break;
                }
                body_lines.push(next.trim());
            }

            let body = body_lines.join("\n").trim().to_string();
            if body.is_empty() {
                return None;
            }
            return Some(body);
        }

        None
    }

    /// An all-caps line, or a line consisting only of a known heading
    fn is_heading_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.all_caps_line.is_match(trimmed) {
            return true;
        }

        let bare = trimmed.trim_end_matches(':').trim();
        SectionKind::ALL.iter().any(|kind| {
            kind.heading().eq_ignore_ascii_case(bare)
                || kind.synonyms().iter().any(|s| s.eq_ignore_ascii_case(bare))
        })
    }
}

/// Returns the remainder of `line` when it starts with `heading` as a whole
/// word, compared case-insensitively.
fn strip_heading<'a>(line: &'a str, heading: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let head = trimmed.get(..heading.len())?;
    if !head.eq_ignore_ascii_case(heading) {
        return None;
    }

    let rest = &trimmed[heading.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\nSKILLS\nPython, SQL, Docker\nEDUCATION\nB.Tech 2022\nEXPERIENCE\nIntern at Acme 2021";

    #[test]
    fn test_canonical_sections() {
        let segmenter = SectionSegmenter::new();

        assert_eq!(segmenter.get_section(RESUME, "SKILLS"), "Python, SQL, Docker");
        assert_eq!(segmenter.get_section(RESUME, "education"), "B.Tech 2022");
        assert_eq!(segmenter.get_section(RESUME, "EXPERIENCE"), "Intern at Acme 2021");
        assert_eq!(segmenter.get_section(RESUME, "PROJECTS"), "");
    }

    #[test]
    fn test_synonym_fallback() {
        let segmenter = SectionSegmenter::new();
        let text = "Academic Background\nM.Tech 2020\nTechnical Skills\nRust, Go\nWORK HISTORY\nEngineer";

        let education = segmenter.section(text, SectionKind::Education).unwrap();
        assert_eq!(education.matched_heading, "ACADEMIC BACKGROUND");
        assert_eq!(education.body, "M.Tech 2020");

        let skills = segmenter.section(text, SectionKind::Skills).unwrap();
        assert_eq!(skills.matched_heading, "TECHNICAL SKILLS");
        assert_eq!(skills.body, "Rust, Go");

        assert_eq!(segmenter.get_section(text, "EXPERIENCE"), "Engineer");
    }

    #[test]
    fn test_heading_must_be_whole_word_at_line_start() {
        let segmenter = SectionSegmenter::new();

        // "EDUCATIONAL" is not the EDUCATION heading, but its synonym is listed
        let text = "EDUCATIONAL QUALIFICATIONS\nB.E 2019";
        let education = segmenter.section(text, SectionKind::Education).unwrap();
        assert_eq!(education.matched_heading, "EDUCATIONAL QUALIFICATIONS");

        let prose = "I love my skills\nand more";
        assert_eq!(segmenter.get_section(prose, "SKILLS"), "");
    }

    #[test]
    fn test_mixed_case_heading_terminates_section() {
        let segmenter = SectionSegmenter::new();
        let text = "Skills\nRust, Kotlin\nEducation\nB.Sc 2018";

        assert_eq!(segmenter.get_section(text, "SKILLS"), "Rust, Kotlin");
    }

    #[test]
    fn test_segment_collects_present_sections() {
        let segmenter = SectionSegmenter::new();
        let sections = segmenter.segment(RESUME);

        assert_eq!(sections.len(), 3);
        assert!(sections.contains_key(&SectionKind::Skills));
        assert!(!sections.contains_key(&SectionKind::Projects));
    }

    #[test]
    fn test_missing_section_is_not_an_error() {
        let segmenter = SectionSegmenter::new();
        assert!(segmenter.section("", SectionKind::Skills).is_none());
        assert!(segmenter.section("SKILLS", SectionKind::Skills).is_none());
    }
}
