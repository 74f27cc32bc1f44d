//! Bag-of-words term counts and cosine similarity

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Reasons the vector method cannot score a candidate. The engine answers
/// either one by switching the whole call to the ratio method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents contain no tokens of two or more word characters")]
    EmptyVocabulary,

    #[error("candidate document has no tokens in the vocabulary")]
    DegenerateCandidate,
}

/// Sparse term-count vector keyed by vocabulary index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    counts: BTreeMap<usize, f64>,
}

impl TermVector {
    pub fn norm(&self) -> f64 {
        self.counts.values().map(|c| c * c).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        self.counts
            .iter()
            .filter_map(|(idx, count)| other.counts.get(idx).map(|o| count * o))
            .sum()
    }

    /// Cosine similarity; zero when either vector is zero
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            return 0.0;
        }
        self.dot(other) / denominator
    }
}

/// Lowercasing count vectorizer over tokens of two or more word characters
pub struct CountVectorizer {
    token: Regex,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    pub fn new() -> Self {
        let token = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");
        Self { token }
    }

    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        self.token
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Fit a vocabulary over `documents` and return one count vector per
    /// document, in input order.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<TermVector>, VectorizeError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.tokenize(d.as_ref())).collect();

        let mut vocabulary: HashMap<&str, usize> = HashMap::new();
        for token in tokenized.iter().flatten() {
            let next = vocabulary.len();
            vocabulary.entry(token.as_str()).or_insert(next);
        }
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let mut vector = TermVector::default();
                for token in tokens {
                    if let Some(&idx) = vocabulary.get(token.as_str()) {
                        *vector.counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
                vector
            })
            .collect();

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_characters() {
        let vectorizer = CountVectorizer::new();
        assert_eq!(vectorizer.tokenize("C++ and R, Machine-Learning"), vec!["and", "machine", "learning"]);
    }

    #[test]
    fn test_cosine() {
        let vectorizer = CountVectorizer::new();
        let vectors = vectorizer
            .fit_transform(&["python sql", "python sql machine learning", "react html css"])
            .unwrap();

        assert!((vectors[0].cosine(&vectors[1]) - 0.70710678).abs() < 1e-6);
        assert_eq!(vectors[0].cosine(&vectors[2]), 0.0);
        assert!((vectors[1].cosine(&vectors[1]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_vocabulary() {
        let vectorizer = CountVectorizer::new();
        assert_eq!(
            vectorizer.fit_transform(&["c r", "", "+ #"]).unwrap_err(),
            VectorizeError::EmptyVocabulary
        );
    }

    #[test]
    fn test_zero_vector() {
        let vectorizer = CountVectorizer::new();
        let vectors = vectorizer.fit_transform(&["c", "python"]).unwrap();

        assert!(vectors[0].is_zero());
        assert_eq!(vectors[0].cosine(&vectors[1]), 0.0);
    }
}
