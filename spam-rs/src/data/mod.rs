//! Dataset module
//!
//! Ingestion of labeled email files and stratified train/test splitting.

pub mod loader;
pub mod splitter;

pub use loader::{extract_body, load_dataset, read_dataset, LabeledEmail};
pub use splitter::{stratified_split, DatasetSplit, LabeledSet};
