//! Classifier types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SpamError;

/// Message class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Both classes, spam first
    pub const ALL: [Label; 2] = [Label::Spam, Label::Ham];

    /// Map a raw dataset marker to a label: the marker "1" is spam, anything else is ham
    pub fn from_marker(marker: &str) -> Self {
        Self::from_marker_with(marker, "1")
    }

    /// Same as [`Label::from_marker`] with a custom spam marker
    pub fn from_marker_with(marker: &str, spam_marker: &str) -> Self {
        if marker.trim() == spam_marker {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Spam => "spam",
            Label::Ham => "ham",
        }
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Label::Spam)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = SpamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spam" => Ok(Label::Spam),
            "ham" => Ok(Label::Ham),
            _ => Err(SpamError::UnknownLabel(s.to_string())),
        }
    }
}

/// Log-space score of each class for one document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassScores {
    pub spam: f64,
    pub ham: f64,
}

impl ClassScores {
    /// Spam wins only on a strictly greater score; ties go to ham
    pub fn decide(&self) -> Label {
        if self.spam > self.ham {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    /// Score for one class
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Spam => self.spam,
            Label::Ham => self.ham,
        }
    }
}

/// 2x2 confusion matrix with spam as the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_negative: u64,
}

impl ConfusionMatrix {
    /// Record one (actual, predicted) outcome
    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (predicted, actual) {
            (Label::Spam, Label::Spam) => self.true_positive += 1,
            (Label::Spam, Label::Ham) => self.false_positive += 1,
            (Label::Ham, Label::Spam) => self.false_negative += 1,
            (Label::Ham, Label::Ham) => self.true_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }
}

/// Metrics derived from a confusion matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl EvaluationReport {
    /// Derive metrics; every ratio with a zero denominator is 0
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let tp = confusion.true_positive as f64;
        let fp = confusion.false_positive as f64;
        let fn_ = confusion.false_negative as f64;
        let tn = confusion.true_negative as f64;

        let accuracy = ratio(tp + tn, confusion.total() as f64);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = ratio(2.0 * precision * recall, precision + recall);

        Self {
            confusion,
            accuracy,
            precision,
            recall,
            f1,
        }
    }

    /// Number of evaluated records
    pub fn support(&self) -> u64 {
        self.confusion.total()
    }
}

impl Default for EvaluationReport {
    fn default() -> Self {
        Self::from_confusion(ConfusionMatrix::default())
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
