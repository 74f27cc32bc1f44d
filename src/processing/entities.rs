//! Optional named-entity recognition collaborator

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Product,
    Org,
    Location,
    Other,
}

impl EntityKind {
    /// Products, organizations and locations are the tags that tend to carry
    /// technology names (e.g. "TensorFlow" tagged as ORG).
    pub fn may_name_skill(&self) -> bool {
        !matches!(self, EntityKind::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub kind: EntityKind,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Entity recognizer unavailable: {0}")]
    Unavailable(String),

    #[error("Entity recognition failed: {0}")]
    Failed(String),
}

/// A recognizer returning entity spans with a type tag. Implementations wrap
/// an external NER model; the extractor treats every failure as "no spans".
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError>;
}

/// Default recognizer used when no NER backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn name(&self) -> &str {
        "noop"
    }

    fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_recognizer() {
        let spans = NoopRecognizer.recognize("Worked at Google on TensorFlow").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_kind_filter() {
        assert!(EntityKind::Product.may_name_skill());
        assert!(EntityKind::Location.may_name_skill());
        assert!(!EntityKind::Other.may_name_skill());
    }
}
