//! Email text cleaning
//!
//! Produces the cleaned, space-separated token stream the feature encoder
//! expects: lower-cased, without email addresses, URLs, HTML markup or
//! punctuation, and with stop words removed.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Result, SpamError};

/// Built-in English stop words
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me", "more",
    "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other",
    "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "with",
    "would", "you", "your", "yours", "yourself", "yourselves",
];

struct Patterns {
    email: Regex,
    url: Regex,
    html: Regex,
    non_alphanumeric: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("static regex"),
        url: Regex::new(r"http\S+|www\S+").expect("static regex"),
        html: Regex::new(r"<[^>]*>").expect("static regex"),
        non_alphanumeric: Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"),
    })
}

/// Text cleaner with a fixed stop-word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessor {
    stopwords: HashSet<String>,
}

impl Preprocessor {
    /// Create a preprocessor from a stop-word list (entries are trimmed and lower-cased)
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = stopwords
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stopwords }
    }

    /// Load stop words from a file, one per line
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamError::Config(format!(
                "Failed to read stopwords file {}: {}",
                path.display(),
                e
            ))
        })?;

        let preprocessor = Self::new(content.lines());
        tracing::debug!(
            "Loaded {} stopwords from {}",
            preprocessor.stopwords.len(),
            path.display()
        );
        Ok(preprocessor)
    }

    /// Clean a raw email text
    pub fn preprocess(&self, text: &str) -> String {
        let p = patterns();
        let text = text.to_lowercase();
        let text = p.email.replace_all(&text, "");
        let text = p.url.replace_all(&text, "");
        let text = p.html.replace_all(&text, "");
        let text = p.non_alphanumeric.replace_all(&text, "");

        text.split_whitespace()
            .filter(|token| !self.stopwords.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Clean a batch of texts
    pub fn preprocess_all<I, S>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().map(|t| self.preprocess(t.as_ref())).collect()
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Stop words in sorted order
    pub fn stopwords(&self) -> Vec<String> {
        let mut words: Vec<String> = self.stopwords.iter().cloned().collect();
        words.sort_unstable();
        words
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_removes_stopwords_and_punctuation() {
        let p = Preprocessor::default();
        assert_eq!(p.preprocess("This is an example email!"), "example email");
    }

    #[test]
    fn test_strips_html() {
        let p = Preprocessor::default();
        assert_eq!(
            p.preprocess("Hello <b>world</b>, welcome to <i>testing</i>!"),
            "hello world welcome testing"
        );
    }

    #[test]
    fn test_strips_urls_and_addresses() {
        let p = Preprocessor::default();
        let cleaned = p.preprocess(
            "From: test@example.com\nSubject: Win a prize!\nVisit https://example.com now to claim your reward!",
        );
        assert_eq!(cleaned, "subject win prize visit now claim reward");
    }

    #[test]
    fn test_output_is_single_spaced() {
        let p = Preprocessor::new(Vec::<String>::new());
        assert_eq!(p.preprocess("  Free\t\tMONEY \n now  "), "free money now");
        assert_eq!(p.preprocess("!!!"), "");
    }

    #[test]
    fn test_custom_stopwords_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Offer").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  today ").unwrap();

        let p = Preprocessor::from_file(file.path()).unwrap();
        assert_eq!(p.stopwords(), vec!["offer".to_string(), "today".to_string()]);
        assert_eq!(p.preprocess("Limited offer today only"), "limited only");
        assert!(p.is_stopword("offer"));
    }

    #[test]
    fn test_missing_stopwords_file() {
        let result = Preprocessor::from_file("/nonexistent/stopwords.txt");
        assert!(matches!(result, Err(SpamError::Config(_))));
    }
}
