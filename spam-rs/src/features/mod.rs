//! Feature extraction module
//!
//! Turns cleaned email text into term-frequency vectors over a fixed vocabulary.

pub mod encoder;
pub mod vocabulary;

pub use encoder::{encode, FeatureEncoder, FeatureVector};
pub use vocabulary::{tokenize, Vocabulary};
