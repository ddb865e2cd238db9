//! Bag-of-words feature encoding

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::vocabulary::{tokenize, Vocabulary};

/// Term-frequency counts aligned to a vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    /// All-zero vector of the given dimension
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw counts
    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    /// (index, count) pairs with a non-zero count
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(j, &count)| (j, count))
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }
}

impl From<Vec<u32>> for FeatureVector {
    fn from(counts: Vec<u32>) -> Self {
        Self(counts)
    }
}

/// Encode cleaned text against a vocabulary.
///
/// Tokens missing from the vocabulary are dropped without error.
pub fn encode(text: &str, vocabulary: &Vocabulary) -> FeatureVector {
    let mut counts = vec![0u32; vocabulary.len()];
    for token in tokenize(text) {
        if let Some(j) = vocabulary.index_of(token) {
            counts[j] += 1;
        }
    }
    FeatureVector(counts)
}

/// Feature encoder owning the vocabulary it was fitted on
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    vocabulary: Arc<Vocabulary>,
}

impl FeatureEncoder {
    /// Build the vocabulary from a cleaned corpus
    pub fn fit<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary = Vocabulary::build(corpus);
        tracing::debug!("Vocabulary built with {} tokens", vocabulary.len());
        Self::from_vocabulary(vocabulary)
    }

    /// Wrap an existing vocabulary
    pub fn from_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
        }
    }

    /// Encode cleaned text
    pub fn encode(&self, text: &str) -> FeatureVector {
        encode(text, &self.vocabulary)
    }

    /// Encode a batch of cleaned texts
    pub fn encode_all<I, S>(&self, texts: I) -> Vec<FeatureVector>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().map(|t| self.encode(t.as_ref())).collect()
    }

    /// Read-only view of the vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Shared handle to the vocabulary
    pub fn shared_vocabulary(&self) -> Arc<Vocabulary> {
        Arc::clone(&self.vocabulary)
    }

    /// Vector dimension produced by this encoder
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
