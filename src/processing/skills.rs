//! Multi-strategy skill extraction against the skill catalog

use crate::error::{RecommenderError, Result};
use crate::processing::catalog::{SkillCatalog, SkillId};
use crate::processing::entities::{EntityRecognizer, NoopRecognizer};
use aho_corasick::AhoCorasick;
use log::{debug, warn};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Minimum normalized Levenshtein similarity for a catalog entry found inside
/// a keyword (e.g. "r" inside "word") to count as its counterpart
pub const DEFAULT_VARIANT_SIMILARITY: f64 = 0.5;

/// Catalog entries up to this many characters only match as whole words
const SHORT_TERM_CHARS: usize = 3;

/// Views of the text shared by all strategies, computed once per call
#[derive(Debug, Clone)]
pub struct ExtractionInput<'a> {
    pub text: &'a str,
    pub lowered: String,
    pub tokens: Vec<String>,
}

impl<'a> ExtractionInput<'a> {
    pub fn new(text: &'a str) -> Self {
        let lowered = text.to_lowercase();

        let stripped: String = lowered
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
            .collect();
        let tokens = stripped.unicode_words().map(str::to_string).collect();

        Self {
            text,
            lowered,
            tokens,
        }
    }
}

/// One independent way of proposing catalog skills found in a text
pub trait SkillStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn propose(&self, input: &ExtractionInput<'_>, catalog: &SkillCatalog) -> BTreeSet<SkillId>;
}

/// Regex requiring `term` not to touch a word character on either side
fn word_bounded(term: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(term)))
        .map_err(|e| RecommenderError::Catalog(format!("Invalid pattern for '{}': {}", term, e)))
}

fn needs_word_boundary(term: &str, catalog: &SkillCatalog) -> bool {
    term.chars().count() <= SHORT_TERM_CHARS || catalog.is_stop_word(term)
}

/// Unigram, bigram and trigram lookups over punctuation-free tokens
#[derive(Debug, Default)]
pub struct TokenStrategy;

impl SkillStrategy for TokenStrategy {
    fn name(&self) -> &'static str {
        "token"
    }

    fn propose(&self, input: &ExtractionInput<'_>, catalog: &SkillCatalog) -> BTreeSet<SkillId> {
        let mut found = BTreeSet::new();
        let tokens = &input.tokens;

        for token in tokens {
            if !catalog.is_stop_word(token) {
                found.extend(catalog.lookup(token));
            }
        }
        for window in tokens.windows(2) {
            found.extend(catalog.lookup(&window.join(" ")));
        }
        for window in tokens.windows(3) {
            found.extend(catalog.lookup(&window.join(" ")));
        }

        found
    }
}

/// Finds every catalog entry occurring in a lowercase text: short entries and
/// stop words as whole words, longer entries as plain substrings.
pub struct TermMatcher {
    bounded: Vec<(SkillId, Regex)>,
    plain: AhoCorasick,
    plain_ids: Vec<SkillId>,
}

impl TermMatcher {
    pub fn new(catalog: &SkillCatalog) -> Result<Self> {
        let mut bounded = Vec::new();
        let mut plain_patterns = Vec::new();
        let mut plain_ids = Vec::new();

        for (id, term) in catalog.terms() {
            if needs_word_boundary(&term.lowered, catalog) {
                bounded.push((id, word_bounded(&term.lowered)?));
            } else {
                plain_patterns.push(term.lowered.as_str());
                plain_ids.push(id);
            }
        }

        let plain = AhoCorasick::new(&plain_patterns)
            .map_err(|e| RecommenderError::Catalog(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            bounded,
            plain,
            plain_ids,
        })
    }

    pub fn occurrences(&self, lowered: &str) -> BTreeSet<SkillId> {
        let mut found: BTreeSet<SkillId> = self
            .bounded
            .iter()
            .filter(|(_, pattern)| pattern.is_match(lowered))
            .map(|(id, _)| *id)
            .collect();

        for mat in self.plain.find_overlapping_iter(lowered) {
            found.insert(self.plain_ids[mat.pattern().as_usize()]);
        }

        found
    }
}

/// Whole-word matching for short entries, substring matching for the rest
pub struct SubstringStrategy {
    matcher: TermMatcher,
}

impl SubstringStrategy {
    pub fn new(catalog: &SkillCatalog) -> Result<Self> {
        Ok(Self {
            matcher: TermMatcher::new(catalog)?,
        })
    }
}

impl SkillStrategy for SubstringStrategy {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn propose(&self, input: &ExtractionInput<'_>, _catalog: &SkillCatalog) -> BTreeSet<SkillId> {
        self.matcher.occurrences(&input.lowered)
    }
}

enum Probe {
    Plain(String),
    Bounded(Regex),
}

impl Probe {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Probe::Plain(variant) => lowered.contains(variant.as_str()),
            Probe::Bounded(pattern) => pattern.is_match(lowered),
        }
    }
}

struct VariantProbe {
    variant: String,
    probe: Probe,
    target: SkillId,
}

/// Supplementary keywords tried with spaces, hyphens and periods removed, to
/// tolerate scanning noise such as "machinelearning" or "nodejs". Every
/// variant of a keyword maps onto the keyword's nearest catalog entry.
pub struct KeywordVariantStrategy {
    probes: Vec<VariantProbe>,
}

impl KeywordVariantStrategy {
    pub fn new(catalog: &SkillCatalog, min_similarity: f64) -> Result<Self> {
        let mut probes = Vec::new();

        for keyword in catalog.keywords() {
            let Some(target) = nearest_entry(catalog, keyword, min_similarity) else {
                debug!("Keyword '{}' has no catalog counterpart", keyword);
                continue;
            };

            let mut variants = vec![
                keyword.clone(),
                keyword.replace(' ', ""),
                keyword.replace('-', ""),
                keyword.replace('.', ""),
            ];
            let mut seen = BTreeSet::new();
            variants.retain(|v| !v.is_empty() && seen.insert(v.clone()));

            for variant in variants {
                let probe = if variant.chars().count() <= SHORT_TERM_CHARS {
                    Probe::Bounded(word_bounded(&variant)?)
                } else {
                    Probe::Plain(variant.clone())
                };
                probes.push(VariantProbe {
                    variant,
                    probe,
                    target,
                });
            }
        }

        Ok(Self { probes })
    }

    /// Number of variants that map onto a catalog entry
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }
}

impl SkillStrategy for KeywordVariantStrategy {
    fn name(&self) -> &'static str {
        "keyword-variant"
    }

    fn propose(&self, input: &ExtractionInput<'_>, catalog: &SkillCatalog) -> BTreeSet<SkillId> {
        self.probes
            .iter()
            .filter(|p| p.probe.matches(&input.lowered))
            .inspect(|p| debug!("Variant '{}' -> {}", p.variant, catalog.canonical(p.target)))
            .map(|p| p.target)
            .collect()
    }
}

/// Nearest catalog entry whose lowercase form contains, or is contained in,
/// `keyword`. Entries extending the keyword win over entries inside it, then
/// higher similarity, then catalog order. Entries inside the keyword must
/// reach `min_similarity`.
fn nearest_entry(catalog: &SkillCatalog, keyword: &str, min_similarity: f64) -> Option<SkillId> {
    let mut best: Option<(SkillId, bool, f64)> = None;

    for (id, term) in catalog.terms() {
        // Only entries containing the keyword or contained in it qualify
        let extends = term.lowered.contains(keyword);
        if !extends && !keyword.contains(term.lowered.as_str()) {
            continue;
        }

        // Short entries inside the keyword must still look like it
        let similarity = strsim::normalized_levenshtein(keyword, &term.lowered);
        if !extends && similarity < min_similarity {
            continue;
        }

        // Prefer containing entries, then the closer spelling
        let better = match best {
            None => true,
            Some((_, best_extends, best_similarity)) => {
                (extends, similarity) > (best_extends, best_similarity)
            }
        };
        if better {
            best = Some((id, extends, similarity));
        }
    }

    best.map(|(id, _, _)| id)
}

/// Maps product, organization and location spans from an external recognizer
/// onto catalog entries.
pub struct EntityStrategy {
    recognizer: Arc<dyn EntityRecognizer>,
    matcher: TermMatcher,
}

impl EntityStrategy {
    pub fn new(catalog: &SkillCatalog, recognizer: Arc<dyn EntityRecognizer>) -> Result<Self> {
        Ok(Self {
            recognizer,
            matcher: TermMatcher::new(catalog)?,
        })
    }
}

impl SkillStrategy for EntityStrategy {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn propose(&self, input: &ExtractionInput<'_>, catalog: &SkillCatalog) -> BTreeSet<SkillId> {
        let spans = match self.recognizer.recognize(input.text) {
            Ok(spans) => spans,
            Err(e) => {
                warn!("Skipping entity assist ({}): {}", self.recognizer.name(), e);
                return BTreeSet::new();
            }
        };

        let mut found = BTreeSet::new();
        for span in spans.iter().filter(|s| s.kind.may_name_skill()) {
            let entity = span.text.trim().to_lowercase();
            if entity.is_empty() {
                continue;
            }

            // Entity equal to or containing a catalog entry
            found.extend(self.matcher.occurrences(&entity));

            // Entity inside a longer catalog entry
            found.extend(
                catalog
                    .terms()
                    .filter(|(_, term)| term.lowered.contains(entity.as_str()))
                    .map(|(id, _)| id),
            );
        }

        found
    }
}

/// Merges the proposals of independent strategies into one sorted skill list.
/// The result does not depend on strategy order.
pub struct SkillExtractor {
    catalog: Arc<SkillCatalog>,
    strategies: Vec<Box<dyn SkillStrategy>>,
}

impl SkillExtractor {
    /// Extractor with all four strategies and no entity recognizer backend
    pub fn new(catalog: Arc<SkillCatalog>) -> Result<Self> {
        Self::with_recognizer(catalog, Arc::new(NoopRecognizer), DEFAULT_VARIANT_SIMILARITY)
    }

    pub fn with_recognizer(
        catalog: Arc<SkillCatalog>,
        recognizer: Arc<dyn EntityRecognizer>,
        variant_min_similarity: f64,
    ) -> Result<Self> {
        let strategies: Vec<Box<dyn SkillStrategy>> = vec![
            Box::new(TokenStrategy),
            Box::new(SubstringStrategy::new(&catalog)?),
            Box::new(KeywordVariantStrategy::new(&catalog, variant_min_similarity)?),
            Box::new(EntityStrategy::new(&catalog, recognizer)?),
        ];

        Ok(Self::from_strategies(catalog, strategies))
    }

    pub fn from_strategies(catalog: Arc<SkillCatalog>, strategies: Vec<Box<dyn SkillStrategy>>) -> Self {
        Self {
            catalog,
            strategies,
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Catalog ids of every skill found by any strategy
    pub fn extract_ids(&self, text: &str) -> BTreeSet<SkillId> {
        let input = ExtractionInput::new(text);
        let mut found = BTreeSet::new();

        for strategy in &self.strategies {
            let proposed = strategy.propose(&input, &self.catalog);
            debug!("{} strategy proposed {} skills", strategy.name(), proposed.len());
            found.extend(proposed);
        }

        found
    }

    /// Deduplicated, alphabetically sorted canonical skill names
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let names: BTreeSet<String> = self
            .extract_ids(text)
            .into_iter()
            .map(|id| self.catalog.canonical(id).to_string())
            .collect();

        names.into_iter().collect()
    }
}
