//! Labeled email dataset loader
//!
//! Reads a CSV file whose first column is a raw label marker and whose
//! remaining columns make up the email text.

use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::classifier::Label;
use crate::config::DatasetConfig;
use crate::error::{Result, SpamError};

/// One labeled email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEmail {
    pub label: Label,
    pub text: String,
}

impl LabeledEmail {
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// Load a dataset file
pub fn load_dataset(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<Vec<LabeledEmail>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        SpamError::Dataset(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let emails = read_dataset(file, config)?;
    info!("Loaded {} emails from {}", emails.len(), path.display());
    Ok(emails)
}

/// Parse a dataset from any reader
pub fn read_dataset<R: Read>(reader: R, config: &DatasetConfig) -> Result<Vec<LabeledEmail>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut emails = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() < 2 {
            warn!("Skipping row {}: expected a label and a text column", row + 1);
            continue;
        }

        let label = Label::from_marker_with(&record[0], &config.spam_marker);
        let raw = record.iter().skip(1).collect::<Vec<_>>().join(",");
        let text = if config.extract_body {
            extract_body(&raw)
        } else {
            raw.trim().to_string()
        };

        emails.push(LabeledEmail { label, text });
    }

    if emails.is_empty() {
        return Err(SpamError::Dataset("dataset contains no usable rows".to_string()));
    }

    Ok(emails)
}

/// Drop the header block (everything up to the first blank line) and HTML tags.
///
/// Text without a blank line is treated as body only.
// Dataset cells are header fragments plus a text body, not complete MIME messages.
pub fn extract_body(raw: &str) -> String {
    let has_header_block = raw.lines().any(|line| line.trim().is_empty());

    let body = if has_header_block {
        raw.lines()
            .skip_while(|line| !line.trim().is_empty())
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        raw.lines().collect::<Vec<_>>().join(" ")
    };

    html_tag_pattern().replace_all(&body, "").trim().to_string()
}

fn html_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}
