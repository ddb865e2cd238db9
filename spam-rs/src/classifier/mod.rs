//! Spam classification module
//!
//! Multinomial Naive Bayes over bag-of-words vectors, plus evaluation metrics.

pub mod naive_bayes;
pub mod types;

pub use naive_bayes::{ClassModel, NaiveBayesClassifier, NaiveBayesModel, DEFAULT_SMOOTHING};
pub use types::*;
