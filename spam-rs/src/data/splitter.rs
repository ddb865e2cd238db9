//! Stratified train/test splitter
//!
//! Records are grouped by label, keeping their original order inside each
//! group. The first `floor(n * train_ratio)` records of every group go to the
//! training side and the rest to the test side. Nothing is shuffled, so the
//! same input always yields the same split; shuffle beforehand for a random one.

use tracing::debug;

use crate::classifier::Label;
use crate::error::{Result, SpamError};

/// One side of a split
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSet<T> {
    pub records: Vec<T>,
    pub labels: Vec<Label>,
    /// Position of each record in the original input
    pub indices: Vec<usize>,
}

impl<T> LabeledSet<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            labels: Vec::new(),
            indices: Vec::new(),
        }
    }

    fn push(&mut self, index: usize, record: T, label: Label) {
        self.records.push(record);
        self.labels.push(label);
        self.indices.push(index);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records carrying the given label
    pub fn count(&self, label: Label) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}

/// Disjoint train and test sides
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<T> {
    pub train: LabeledSet<T>,
    pub test: LabeledSet<T>,
}

/// Split records by label, preserving per-label proportions.
///
/// Label groups are emitted in order of their first appearance in `labels`.
pub fn stratified_split<T>(records: Vec<T>, labels: &[Label], train_ratio: f64) -> Result<DatasetSplit<T>> {
    if records.len() != labels.len() {
        return Err(SpamError::InvalidInput(format!(
            "{} records but {} labels",
            records.len(),
            labels.len()
        )));
    }
    if !train_ratio.is_finite() || train_ratio <= 0.0 || train_ratio > 1.0 {
        return Err(SpamError::InvalidInput(format!(
            "train ratio must be in (0, 1], got {}",
            train_ratio
        )));
    }

    let mut groups: Vec<(Label, Vec<usize>)> = Vec::with_capacity(Label::ALL.len());
    for (i, &label) in labels.iter().enumerate() {
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, indices)) => indices.push(i),
            None => groups.push((label, vec![i])),
        }
    }

    let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
    let mut split = DatasetSplit {
        train: LabeledSet::new(),
        test: LabeledSet::new(),
    };

    for (label, indices) in groups {
        let train_size = train_count(indices.len(), train_ratio);
        debug!(
            "Label {}: {} train / {} test",
            label,
            train_size,
            indices.len() - train_size
        );

        for (position, index) in indices.into_iter().enumerate() {
            // Every index belongs to exactly one group, so each slot is taken once
            let Some(record) = slots[index].take() else {
                continue;
            };
            if position < train_size {
                split.train.push(index, record, label);
            } else {
                split.test.push(index, record, label);
            }
        }
    }

    Ok(split)
}

/// floor(n * ratio), clamped to n
fn train_count(n: usize, ratio: f64) -> usize {
    ((n as f64 * ratio).floor() as usize).min(n)
}
