//! Token vocabulary
//!
//! Assigns every distinct token of a cleaned corpus a column index, in order
//! of first appearance. Once built, a vocabulary never changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SpamError};

/// Split cleaned text into tokens.
///
/// Shared by the vocabulary builder and the encoder so both always agree on
/// token boundaries.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Immutable token -> index mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    /// Tokens in index order
    tokens: Vec<String>,
    /// Reverse lookup
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a corpus of cleaned documents
    pub fn build<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = Vec::new();
        let mut index = HashMap::new();

        for document in corpus {
            for token in tokenize(document.as_ref()) {
                if !index.contains_key(token) {
                    index.insert(token.to_string(), tokens.len());
                    tokens.push(token.to_string());
                }
            }
        }

        Self { tokens, index }
    }

    /// Column index of a token, if known
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Token stored at a column index
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in index order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = SpamError;

    /// Rebuild from a token list in index order.
    ///
    /// Every entry must be a single non-empty token and appear once.
    fn try_from(tokens: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (position, token) in tokens.iter().enumerate() {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(SpamError::InvalidInput(format!(
                    "vocabulary entry {} ({:?}) is not a single token",
                    position, token
                )));
            }
            if index.insert(token.clone(), position).is_some() {
                return Err(SpamError::InvalidInput(format!(
                    "vocabulary token {:?} appears more than once",
                    token
                )));
            }
        }
        Ok(Self { tokens, index })
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.tokens
    }
}
