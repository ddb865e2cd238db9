//! Multinomial Naive Bayes classifier
//!
//! Estimates class priors and per-token conditional probabilities from
//! term-frequency vectors with additive (Laplace) smoothing, and scores new
//! vectors in log space.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::types::*;
use crate::error::{Result, SpamError};
use crate::features::FeatureVector;

/// Default additive smoothing constant
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Allowed drift of a probability sum from 1 in a loaded model
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Parameters estimated for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    /// Fraction of training documents in this class
    pub prior: f64,
    /// P(token_j | class) for every vocabulary index
    pub probabilities: Vec<f64>,
    /// Training documents in this class
    pub document_count: u64,
    /// Sum of all token counts in this class
    pub token_count: u64,
}

impl ClassModel {
    fn estimate(counts: &[u64], document_count: u64, total_documents: u64, smoothing: f64) -> Self {
        let token_count: u64 = counts.iter().sum();
        let denominator = token_count as f64 + smoothing * counts.len() as f64;
        let probabilities = counts
            .iter()
            .map(|&c| (c as f64 + smoothing) / denominator)
            .collect();

        Self {
            prior: document_count as f64 / total_documents as f64,
            probabilities,
            document_count,
            token_count,
        }
    }

    /// ln(prior) plus count-weighted log probabilities of the present features
    fn log_score(&self, vector: &FeatureVector) -> f64 {
        vector
            .non_zero()
            .fold(self.prior.ln(), |score, (j, count)| {
                score + count as f64 * self.probabilities[j].ln()
            })
    }
}

/// Trained, immutable Naive Bayes parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    num_features: usize,
    smoothing: f64,
    spam: ClassModel,
    ham: ClassModel,
}

impl NaiveBayesModel {
    /// Estimate a model from training vectors and their labels
    pub fn fit(vectors: &[FeatureVector], labels: &[Label], smoothing: f64) -> Result<Self> {
        validate_smoothing(smoothing)?;

        let first = vectors
            .first()
            .ok_or_else(|| SpamError::InvalidInput("training set is empty".to_string()))?;
        let num_features = first.len();
        if num_features == 0 {
            return Err(SpamError::InvalidInput(
                "feature vectors have zero length".to_string(),
            ));
        }
        if labels.len() != vectors.len() {
            return Err(SpamError::InvalidInput(format!(
                "{} training vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }

        let mut spam_counts = vec![0u64; num_features];
        let mut ham_counts = vec![0u64; num_features];
        let mut spam_docs = 0u64;
        let mut ham_docs = 0u64;

        for (i, (vector, label)) in vectors.iter().zip(labels).enumerate() {
            if vector.len() != num_features {
                return Err(SpamError::InvalidInput(format!(
                    "vector {} has length {}, expected {}",
                    i,
                    vector.len(),
                    num_features
                )));
            }

            let counts = match label {
                Label::Spam => {
                    spam_docs += 1;
                    &mut spam_counts
                }
                Label::Ham => {
                    ham_docs += 1;
                    &mut ham_counts
                }
            };
            for (j, count) in vector.non_zero() {
                counts[j] += count as u64;
            }
        }

        let total_docs = vectors.len() as u64;
        let spam = ClassModel::estimate(&spam_counts, spam_docs, total_docs, smoothing);
        let ham = ClassModel::estimate(&ham_counts, ham_docs, total_docs, smoothing);

        debug!(
            "Class statistics: spam {} docs / {} tokens, ham {} docs / {} tokens",
            spam.document_count, spam.token_count, ham.document_count, ham.token_count
        );

        Ok(Self {
            num_features,
            smoothing,
            spam,
            ham,
        })
    }

    /// Log-space score for each class
    pub fn scores(&self, vector: &FeatureVector) -> Result<ClassScores> {
        if vector.len() != self.num_features {
            return Err(SpamError::InvalidInput(format!(
                "vector has length {}, model expects {}",
                vector.len(),
                self.num_features
            )));
        }

        Ok(ClassScores {
            spam: self.spam.log_score(vector),
            ham: self.ham.log_score(vector),
        })
    }

    /// Most likely label for a vector
    pub fn predict(&self, vector: &FeatureVector) -> Result<Label> {
        Ok(self.scores(vector)?.decide())
    }

    /// Predict every test vector and compare against ground truth
    pub fn evaluate(&self, vectors: &[FeatureVector], labels: &[Label]) -> Result<EvaluationReport> {
        if vectors.len() != labels.len() {
            return Err(SpamError::InvalidInput(format!(
                "{} test vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }

        let mut confusion = ConfusionMatrix::default();
        for (vector, &actual) in vectors.iter().zip(labels) {
            confusion.record(actual, self.predict(vector)?);
        }

        let report = EvaluationReport::from_confusion(confusion);
        debug!(
            "Evaluated {} records: accuracy {:.4}, f1 {:.4}",
            report.support(),
            report.accuracy,
            report.f1
        );
        Ok(report)
    }

    /// Parameters of one class
    pub fn class(&self, label: Label) -> &ClassModel {
        match label {
            Label::Spam => &self.spam,
            Label::Ham => &self.ham,
        }
    }

    /// Vector dimension the model was trained on
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Check that deserialized parameters form a valid model: matching table
    /// lengths, strictly positive tables summing to 1 and priors summing to 1
    pub fn validate(&self) -> Result<()> {
        validate_smoothing(self.smoothing)?;
        for label in Label::ALL {
            let class = self.class(label);
            if class.probabilities.len() != self.num_features {
                return Err(SpamError::InvalidInput(format!(
                    "{} table has {} entries, model declares {} features",
                    label,
                    class.probabilities.len(),
                    self.num_features
                )));
            }
            if !(0.0..=1.0).contains(&class.prior) {
                return Err(SpamError::InvalidInput(format!(
                    "{} prior {} is not a probability",
                    label, class.prior
                )));
            }
            if let Some(p) = class.probabilities.iter().find(|p| !p.is_finite() || **p <= 0.0) {
                return Err(SpamError::InvalidInput(format!(
                    "{} table holds non-positive probability {}",
                    label, p
                )));
            }
            let total: f64 = class.probabilities.iter().sum();
            if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(SpamError::InvalidInput(format!(
                    "{} table sums to {}, not 1",
                    label, total
                )));
            }
        }

        let priors = self.spam.prior + self.ham.prior;
        if (priors - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SpamError::InvalidInput(format!(
                "class priors sum to {}, not 1",
                priors
            )));
        }
        Ok(())
    }
}

/// Classifier handle that may or may not hold a trained model
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    smoothing: f64,
    model: Option<NaiveBayesModel>,
}

impl NaiveBayesClassifier {
    /// Untrained classifier with the default smoothing constant
    pub fn new() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            model: None,
        }
    }

    /// Untrained classifier with a custom smoothing constant (must be > 0)
    pub fn with_smoothing(smoothing: f64) -> Result<Self> {
        validate_smoothing(smoothing)?;
        Ok(Self {
            smoothing,
            model: None,
        })
    }

    /// Retrain from scratch. On error the previous model, if any, is kept.
    pub fn train(&mut self, vectors: &[FeatureVector], labels: &[Label]) -> Result<()> {
        let model = NaiveBayesModel::fit(vectors, labels, self.smoothing)?;
        info!(
            "Trained Naive Bayes model on {} documents ({} features)",
            vectors.len(),
            model.num_features()
        );
        self.model = Some(model);
        Ok(())
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<Label> {
        self.trained()?.predict(vector)
    }

    pub fn scores(&self, vector: &FeatureVector) -> Result<ClassScores> {
        self.trained()?.scores(vector)
    }

    pub fn evaluate(&self, vectors: &[FeatureVector], labels: &[Label]) -> Result<EvaluationReport> {
        self.trained()?.evaluate(vectors, labels)
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Trained parameters, if any
    pub fn model(&self) -> Option<&NaiveBayesModel> {
        self.model.as_ref()
    }

    /// Take the trained model out of the handle
    pub fn into_model(self) -> Result<NaiveBayesModel> {
        self.model.ok_or(SpamError::UntrainedModel)
    }

    fn trained(&self) -> Result<&NaiveBayesModel> {
        self.model.as_ref().ok_or(SpamError::UntrainedModel)
    }
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_smoothing(smoothing: f64) -> Result<()> {
    if smoothing.is_finite() && smoothing > 0.0 {
        Ok(())
    } else {
        Err(SpamError::InvalidInput(format!(
            "smoothing must be a positive finite number, got {}",
            smoothing
        )))
    }
}
