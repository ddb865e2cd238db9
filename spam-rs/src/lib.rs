//! spam-rs: Bag-of-words Naive Bayes spam filter
//!
//! Classifies short email texts as spam or ham with a multinomial Naive Bayes
//! model trained from labeled examples.
//!
//! # Features
//!
//! - **Vocabulary**: stable token indices in order of first appearance
//! - **Encoding**: term-frequency vectors, unknown tokens ignored
//! - **Training**: class priors and Laplace-smoothed token probabilities
//! - **Inference**: log-space scoring, ties resolve to ham
//! - **Evaluation**: accuracy, precision, recall and F1 with spam as positive
//! - **Splitting**: deterministic stratified train/test split
//!
//! # Example
//!
//! ```
//! use spam_rs::classifier::{Label, NaiveBayesClassifier};
//! use spam_rs::features::FeatureEncoder;
//!
//! let corpus = ["win free prize now", "meeting notes attached", "free offer click now"];
//! let labels = [Label::Spam, Label::Ham, Label::Spam];
//!
//! let encoder = FeatureEncoder::fit(corpus);
//! let vectors = encoder.encode_all(corpus);
//!
//! let mut classifier = NaiveBayesClassifier::new();
//! classifier.train(&vectors, &labels)?;
//!
//! let label = classifier.predict(&encoder.encode("free prize"))?;
//! assert_eq!(label, Label::Spam);
//! # Ok::<(), spam_rs::SpamError>(())
//! ```
//!
//! # Modules
//!
//! - [`features`]: Vocabulary and feature encoding
//! - [`classifier`]: Naive Bayes model and evaluation
//! - [`data`]: Dataset loading and stratified splitting
//! - [`preprocess`]: Email text cleaning
//! - [`pipeline`]: Caller-owned end-to-end filter
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

pub mod classifier;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod preprocess;

// Re-export commonly used types
pub use classifier::{EvaluationReport, Label, NaiveBayesClassifier, NaiveBayesModel};
pub use config::Config;
pub use error::{Result, SpamError};
pub use features::{FeatureEncoder, FeatureVector, Vocabulary};
pub use pipeline::{SpamFilter, TrainingOutcome};
pub use preprocess::Preprocessor;
