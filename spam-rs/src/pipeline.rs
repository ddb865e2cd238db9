//! End-to-end spam filter
//!
//! Bundles the text cleaner, the feature encoder and a trained model into a
//! single caller-owned value. Raw text goes in, a label comes out.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::classifier::{ClassScores, EvaluationReport, Label, NaiveBayesModel};
use crate::config::TrainingConfig;
use crate::data::{stratified_split, LabeledEmail};
use crate::error::{Result, SpamError};
use crate::features::{FeatureEncoder, FeatureVector, Vocabulary};
use crate::preprocess::Preprocessor;

/// Trained filter ready for classification
#[derive(Debug, Clone)]
pub struct SpamFilter {
    preprocessor: Preprocessor,
    encoder: FeatureEncoder,
    model: NaiveBayesModel,
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub filter: SpamFilter,
    /// Metrics on the held-out side of the split
    pub report: EvaluationReport,
    pub train_size: usize,
    pub test_size: usize,
}

/// On-disk form of a trained filter
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    stopwords: Vec<String>,
    vocabulary: Vocabulary,
    model: NaiveBayesModel,
}

impl SpamFilter {
    /// Assemble a filter from parts that were trained together
    pub fn new(preprocessor: Preprocessor, encoder: FeatureEncoder, model: NaiveBayesModel) -> Result<Self> {
        if encoder.dimension() != model.num_features() {
            return Err(SpamError::InvalidInput(format!(
                "vocabulary has {} tokens but model expects {} features",
                encoder.dimension(),
                model.num_features()
            )));
        }
        Ok(Self {
            preprocessor,
            encoder,
            model,
        })
    }

    /// Clean and encode every email, split per label, train, then evaluate on the held-out side.
    ///
    /// The vocabulary is built over the whole cleaned corpus so that train and
    /// test vectors share the same columns.
    pub fn train_and_evaluate(
        emails: &[LabeledEmail],
        preprocessor: Preprocessor,
        config: &TrainingConfig,
    ) -> Result<TrainingOutcome> {
        config.validate()?;
        if emails.is_empty() {
            return Err(SpamError::InvalidInput("no emails to train on".to_string()));
        }

        let cleaned = preprocessor.preprocess_all(emails.iter().map(|e| e.text.as_str()));
        let encoder = FeatureEncoder::fit(&cleaned);
        let vectors = encoder.encode_all(&cleaned);
        let labels: Vec<Label> = emails.iter().map(|e| e.label).collect();

        let split = stratified_split(vectors, &labels, config.train_ratio)?;
        info!(
            "Split {} emails into {} train / {} test",
            emails.len(),
            split.train.len(),
            split.test.len()
        );

        let model = NaiveBayesModel::fit(&split.train.records, &split.train.labels, config.smoothing)?;
        let report = model.evaluate(&split.test.records, &split.test.labels)?;
        info!(
            "Evaluation: accuracy {:.4}, precision {:.4}, recall {:.4}, f1 {:.4}",
            report.accuracy, report.precision, report.recall, report.f1
        );

        Ok(TrainingOutcome {
            train_size: split.train.len(),
            test_size: split.test.len(),
            filter: Self::new(preprocessor, encoder, model)?,
            report,
        })
    }

    /// Clean and encode raw text with this filter's vocabulary
    pub fn vectorize(&self, raw_text: &str) -> FeatureVector {
        self.encoder.encode(&self.preprocessor.preprocess(raw_text))
    }

    /// Classify raw email text
    pub fn classify(&self, raw_text: &str) -> Result<Label> {
        self.model.predict(&self.vectorize(raw_text))
    }

    /// Per-class log scores of raw email text
    pub fn scores(&self, raw_text: &str) -> Result<ClassScores> {
        self.model.scores(&self.vectorize(raw_text))
    }

    /// Evaluate against another labeled set
    pub fn evaluate(&self, emails: &[LabeledEmail]) -> Result<EvaluationReport> {
        let vectors: Vec<FeatureVector> = emails.iter().map(|e| self.vectorize(&e.text)).collect();
        let labels: Vec<Label> = emails.iter().map(|e| e.label).collect();
        self.model.evaluate(&vectors, &labels)
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn model(&self) -> &NaiveBayesModel {
        &self.model
    }

    /// Write a JSON snapshot of the filter
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let snapshot = Snapshot {
            stopwords: self.preprocessor.stopwords(),
            vocabulary: self.encoder.vocabulary().clone(),
            model: self.model.clone(),
        };
        let file = std::fs::File::create(path.as_ref())?;
        serde_json::to_writer(std::io::BufWriter::new(file), &snapshot)?;
        info!("Saved spam filter to {}", path.as_ref().display());
        Ok(())
    }

    /// Read a snapshot written by [`SpamFilter::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_reader(std::io::BufReader::new(file))?;
        snapshot.model.validate()?;

        let filter = Self::new(
            Preprocessor::new(snapshot.stopwords),
            FeatureEncoder::from_vocabulary(snapshot.vocabulary),
            snapshot.model,
        )?;
        info!(
            "Loaded spam filter from {} ({} features)",
            path.as_ref().display(),
            filter.model.num_features()
        );
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn emails() -> Vec<LabeledEmail> {
        let spam = [
            "Win a FREE prize now, click here!",
            "Cheap pills, limited offer, buy now",
            "Congratulations! You won the lottery prize",
            "Exclusive offer: free money, click now",
            "Claim your free prize today",
        ];
        let ham = [
            "Can we reschedule the meeting to Monday?",
            "Please review the attached project document",
            "Lunch tomorrow with the team?",
            "The meeting notes are attached for review",
            "Project status update for the team",
        ];
        spam.iter()
            .map(|t| LabeledEmail::new(Label::Spam, *t))
            .chain(ham.iter().map(|t| LabeledEmail::new(Label::Ham, *t)))
            .collect()
    }

    fn outcome() -> TrainingOutcome {
        SpamFilter::train_and_evaluate(&emails(), Preprocessor::default(), &TrainingConfig::default())
            .unwrap()
    }

    #[test]
    fn test_train_and_evaluate_split_sizes() {
        let outcome = outcome();

        assert_eq!(outcome.train_size, 8);
        assert_eq!(outcome.test_size, 2);
        assert_eq!(outcome.report.support(), 2);
    }

    #[test]
    fn test_classify_raw_text() {
        let filter = outcome().filter;

        assert_eq!(filter.classify("FREE prize, click now!").unwrap(), Label::Spam);
        assert_eq!(filter.classify("Meeting about the project").unwrap(), Label::Ham);
    }

    #[test]
    fn test_held_out_emails_are_classified_correctly() {
        let outcome = outcome();

        assert_eq!(outcome.report.accuracy, 1.0);
        assert_eq!(outcome.report.f1, 1.0);
    }

    #[test]
    fn test_vocabulary_covers_test_side() {
        let filter = outcome().filter;
        // "status" only occurs in a held-out ham email
        assert!(filter.encoder().vocabulary().index_of("status").is_some());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = SpamFilter::train_and_evaluate(&[], Preprocessor::default(), &TrainingConfig::default());
        assert!(matches!(result, Err(SpamError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_training_config() {
        let config = TrainingConfig {
            train_ratio: 0.0,
            ..TrainingConfig::default()
        };
        let err = SpamFilter::train_and_evaluate(&emails(), Preprocessor::default(), &config).unwrap_err();
        assert!(matches!(err, SpamError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: train_ratio must be in (0, 1], got 0"
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let filter = outcome().filter;
        filter.save(&path).unwrap();

        let loaded = SpamFilter::load(&path).unwrap();
        assert_eq!(loaded.model().num_features(), filter.model().num_features());
        assert_eq!(loaded.encoder().vocabulary(), filter.encoder().vocabulary());
        assert_eq!(loaded.preprocessor(), filter.preprocessor());

        let text = "Claim a free prize";
        let before = filter.scores(text).unwrap();
        let after = loaded.scores(text).unwrap();
        assert!((before.spam - after.spam).abs() < 1e-9);
        assert!((before.ham - after.ham).abs() < 1e-9);
        assert_eq!(loaded.classify(text).unwrap(), Label::Spam);
    }

    #[test]
    fn test_load_rejects_inconsistent_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        outcome().filter.save(&path).unwrap();

        let mut value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        value["vocabulary"].as_array_mut().unwrap().pop();
        std::fs::write(&path, value.to_string()).unwrap();

        assert!(matches!(SpamFilter::load(&path), Err(SpamError::InvalidInput(_))));
    }

    #[test]
    fn test_load_rejects_invalid_probabilities() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        outcome().filter.save(&path).unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        let mut negative = saved.clone();
        for p in negative["model"]["spam"]["probabilities"].as_array_mut().unwrap() {
            *p = serde_json::json!(-0.5);
        }
        let mut priors = saved.clone();
        priors["model"]["spam"]["prior"] = serde_json::json!(0.9);
        priors["model"]["ham"]["prior"] = serde_json::json!(0.9);
        let mut unnormalized = saved.clone();
        unnormalized["model"]["ham"]["probabilities"][0] = serde_json::json!(0.5);

        for tampered in [negative, priors, unnormalized] {
            std::fs::write(&path, tampered.to_string()).unwrap();
            assert!(matches!(SpamFilter::load(&path), Err(SpamError::InvalidInput(_))));
        }

        let mut duplicated = saved;
        let first = duplicated["vocabulary"][0].clone();
        duplicated["vocabulary"][1] = first;
        std::fs::write(&path, duplicated.to_string()).unwrap();
        assert!(matches!(SpamFilter::load(&path), Err(SpamError::Json(_))));
    }

    #[test]
    fn test_mismatched_parts_are_rejected() {
        let filter = outcome().filter;
        let encoder = FeatureEncoder::fit(["only three tokens"]);

        let result = SpamFilter::new(Preprocessor::default(), encoder, filter.model().clone());
        assert!(matches!(result, Err(SpamError::InvalidInput(_))));
    }
}
