//! Text normalization ahead of segmentation and skill matching

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Normalized view of a document: an original-case copy used for heading
/// detection and a lowercase copy used for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub original: String,
    pub lowered: String,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn len(&self) -> usize {
        self.original.chars().count()
    }
}

pub struct TextNormalizer {
    horizontal_whitespace: Regex,
    newline_runs: Regex,
    preserved_symbols: Vec<char>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let horizontal_whitespace = Regex::new(r"[^\S\n]+")
            .expect("Invalid horizontal whitespace regex");

        let newline_runs = Regex::new(r"[^\S\n]*\n\s*")
            .expect("Invalid newline regex");

        Self {
            horizontal_whitespace,
            newline_runs,
            preserved_symbols: Vec::new(),
        }
    }

    /// Keep additional symbols (e.g. `+` and `#` for "C++" and "C#") that
    /// would otherwise be replaced by spaces.
    pub fn with_preserved_symbols(mut self, symbols: &str) -> Self {
        self.preserved_symbols = symbols.chars().filter(|c| !c.is_alphanumeric()).collect();
        self.preserved_symbols.sort_unstable();
        self.preserved_symbols.dedup();
        self
    }

    /// Normalize arbitrary text. Never fails; empty input gives an empty result.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        let stripped: String = unified.chars().map(|c| self.map_char(c)).collect();

        let collapsed = self.horizontal_whitespace.replace_all(&stripped, " ");
        let collapsed = self.newline_runs.replace_all(&collapsed, "\n");

        let original = collapsed.trim().to_string();
        let lowered = original.to_lowercase();

        NormalizedText { original, lowered }
    }

    /// Normalize raw bytes; input that is not valid UTF-8 degrades to an
    /// empty result.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> NormalizedText {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.normalize(text),
            Err(e) => {
                log::debug!("Discarding non UTF-8 input: {}", e);
                NormalizedText::default()
            }
        }
    }

    fn map_char(&self, c: char) -> char {
        match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2026}' => '.',
            c if c.is_alphanumeric() || c == '_' || c.is_whitespace() => c,
            '.' | ',' | '-' => c,
            c if self.preserved_symbols.contains(&c) => c,
            _ => ' ',
        }
    }
}
