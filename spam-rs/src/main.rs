//! spam-rs: command-line front end
//!
//! # Usage
//!
//! ```bash
//! # Train on a labeled CSV and print held-out metrics
//! spam-rs evaluate --dataset data/spam_assassin.csv
//!
//! # Train and save a model snapshot
//! spam-rs train --dataset data/spam_assassin.csv --output model.json
//!
//! # Classify texts with a saved model (reads stdin lines when no text is given)
//! spam-rs classify --model model.json "Win a free prize now"
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::data::load_dataset;
use spam_rs::{EvaluationReport, Preprocessor, SpamFilter, TrainingOutcome};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Naive Bayes spam filter", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a dataset and report metrics on the held-out split
    Evaluate {
        /// Labeled CSV dataset (overrides the config file)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        /// Fraction of each label used for training
        #[arg(long)]
        train_ratio: Option<f64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Train on a dataset and save the filter
    Train {
        /// Labeled CSV dataset (overrides the config file)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        /// Fraction of each label used for training
        #[arg(long)]
        train_ratio: Option<f64>,
        /// Snapshot output path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Classify texts with a saved filter
    Classify {
        /// Snapshot written by `train`
        #[arg(short, long)]
        model: PathBuf,
        /// Texts to classify; stdin lines are used when empty
        texts: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(&config.logging);

    match cli.command {
        Commands::Evaluate {
            dataset,
            train_ratio,
            json,
        } => {
            let outcome = train(&config, dataset, train_ratio)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.report)?);
            } else {
                print_report(&outcome);
            }
        }
        Commands::Train {
            dataset,
            train_ratio,
            output,
        } => {
            let outcome = train(&config, dataset, train_ratio)?;
            print_report(&outcome);
            outcome
                .filter
                .save(&output)
                .with_context(|| format!("Failed to save model to {}", output.display()))?;
            println!("✓ Model saved to {}", output.display());
        }
        Commands::Classify { model, texts } => {
            let filter = SpamFilter::load(&model)
                .with_context(|| format!("Failed to load model {}", model.display()))?;

            if texts.is_empty() {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    println!("{}", filter.classify(&line)?);
                }
            } else {
                for text in &texts {
                    println!("{}", filter.classify(text)?);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("spam_rs={}", logging.level).into());

    // Logs go to stderr so stdout stays machine-readable
    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn train(
    config: &Config,
    dataset: Option<PathBuf>,
    train_ratio: Option<f64>,
) -> anyhow::Result<TrainingOutcome> {
    let dataset = match dataset.or_else(|| config.dataset.path.as_ref().map(PathBuf::from)) {
        Some(path) => path,
        None => bail!("No dataset given: pass --dataset or set [dataset] path in the config"),
    };

    let mut training = config.training.clone();
    if let Some(ratio) = train_ratio {
        training.train_ratio = ratio;
    }

    let preprocessor = match &config.preprocess.stopwords_path {
        Some(path) => Preprocessor::from_file(Path::new(path))?,
        None => Preprocessor::default(),
    };

    info!("Training on {}", dataset.display());
    let emails = load_dataset(&dataset, &config.dataset)
        .with_context(|| format!("Failed to load dataset {}", dataset.display()))?;

    Ok(SpamFilter::train_and_evaluate(&emails, preprocessor, &training)?)
}

fn print_report(outcome: &TrainingOutcome) {
    let report: &EvaluationReport = &outcome.report;
    let confusion = &report.confusion;

    println!("Evaluation Metrics:");
    println!("{:-<40}", "");
    println!("{:<20} {}", "Train size:", outcome.train_size);
    println!("{:<20} {}", "Test size:", outcome.test_size);
    println!("{:<20} {}", "Vocabulary:", outcome.filter.model().num_features());
    println!("{:-<40}", "");
    println!("{:<20} {:.4}", "Accuracy:", report.accuracy);
    println!("{:<20} {:.4}", "Precision:", report.precision);
    println!("{:<20} {:.4}", "Recall:", report.recall);
    println!("{:<20} {:.4}", "F1-Score:", report.f1);
    println!("{:-<40}", "");
    println!(
        "{:<20} tp={} fp={} fn={} tn={}",
        "Confusion:",
        confusion.true_positive,
        confusion.false_positive,
        confusion.false_negative,
        confusion.true_negative
    );
}
