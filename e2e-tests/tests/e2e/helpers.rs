use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;

/// Raw spam bodies, with mail headers and markup as they arrive in the dataset
const SPAM: &[&str] = &[
    "From: promo@deals.example\nSubject: WINNER\n\nCongratulations! You have WON a free prize. Click <a href=\"http://win.example\">here</a> now!",
    "Subject: Limited offer\n\nCheap pills, limited time discount. Buy now, pay later!",
    "Subject: Act now\n\nExclusive offer: claim your free money today, click now",
    "From: lottery@prize.example\n\nYou won the lottery! Claim your prize, send your bank details",
    "Subject: Free gift\n\n<p>Free gift card winner, click to claim your prize now</p>",
    "Subject: Discount\n\nHuge discount on cheap watches, limited offer, buy today",
    "Subject: Money\n\nMake money fast from home, free trial, click now www.fast-money.example",
    "Subject: Prize\n\nClaim your free vacation prize, exclusive winner offer",
    "Subject: Urgent\n\nUrgent: your account wins a cash prize, click the link now",
    "Subject: Deal\n\nBuy cheap pills online, discount offer, free shipping today",
];

/// Raw ham bodies
const HAM: &[&str] = &[
    "From: alice@corp.example\nSubject: Meeting\n\nCan we reschedule the project meeting to Monday afternoon?",
    "Subject: Report\n\nPlease review the attached quarterly report before the meeting.",
    "Subject: Lunch\n\nAre you free for lunch with the team on Friday?",
    "Subject: Notes\n\nMeeting notes from yesterday are attached, please review them.",
    "Subject: Status\n\nProject status update: the release is scheduled for next week.",
    "Subject: Review\n\nCould you review my pull request for the parser module?",
    "Subject: Agenda\n\nAgenda for the weekly team meeting is attached.",
    "Subject: Thanks\n\nThanks for the document, I will send comments tomorrow.",
    "Subject: Schedule\n\nThe project review is scheduled for Thursday morning.",
    "Subject: Invoice\n\nAttached is the invoice for last month, let me know about questions.",
];

/// Temporary workspace holding dataset, stopword and config files
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment
    pub fn new() -> Self {
        init_tracing();
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write the labeled email dataset ("1" marks spam) and return its path
    pub fn write_dataset(&self) -> PathBuf {
        let mut content = String::from("label,email\n");
        // Interleave so that order inside each label is the only thing that matters
        for (spam, ham) in SPAM.iter().zip(HAM) {
            content.push_str(&format!("1,{}\n", quote(spam)));
            content.push_str(&format!("0,{}\n", quote(ham)));
        }
        let path = self.path("emails.csv");
        fs::write(&path, content).expect("write dataset");
        path
    }

    /// Write a small stop-word list and return its path
    pub fn write_stopwords(&self) -> PathBuf {
        let words = [
            "a", "an", "the", "to", "for", "on", "of", "from", "is", "are", "you", "your", "we",
            "i", "can", "with", "me", "my", "and", "be", "will", "let", "know", "about", "in",
        ];
        let path = self.path("stopwords.txt");
        fs::write(&path, words.join("\n")).expect("write stopwords");
        path
    }

    /// Write a config file pointing at the dataset and stop words
    pub fn write_config(&self, train_ratio: f64) -> PathBuf {
        let dataset = self.write_dataset();
        let stopwords = self.write_stopwords();
        let content = format!(
            r#"
[dataset]
path = "{}"
spam_marker = "1"

[preprocess]
stopwords_path = "{}"

[training]
train_ratio = {}
smoothing = 1.0

[logging]
level = "debug"
format = "pretty"
"#,
            toml_path(&dataset),
            toml_path(&stopwords),
            train_ratio
        );
        let path = self.path("spam-rs.toml");
        fs::write(&path, content).expect("write config");
        path
    }

    pub fn spam_count() -> usize {
        SPAM.len()
    }

    pub fn ham_count() -> usize {
        HAM.len()
    }
}

/// Test result summary
pub struct TestResult {
    pub name: String,
    pub message: String,
    pub duration: Duration,
}

impl TestResult {
    pub fn success(name: String, duration: Duration) -> Self {
        Self {
            name,
            message: "✅ Test passed".to_string(),
            duration,
        }
    }

    pub fn print(&self) {
        println!("\n{}", "=".repeat(80));
        println!("📝 Test: {}", self.name);
        println!("⏱️  Duration: {:?}", self.duration);
        println!("{}", self.message);
        println!("{}", "=".repeat(80));
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("spam_rs=debug")
            .with_test_writer()
            .try_init();
    });
}
