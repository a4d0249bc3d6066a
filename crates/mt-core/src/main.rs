//! Mail Triage - spam/ham classification and evaluation
//!
//! One-shot batch pipeline: load the training and test corpora, wrangle
//! them into tokens, train the selected classifier, evaluate against the
//! test corpus, and print the report. The report goes to stdout; all log
//! output goes to stderr.

use clap::{Parser, ValueEnum};
use mt_common::{Error, OutputFormat};
use mt_core::classify::{Classifier, Knn, LogTrace, NaiveBayes, NaiveBayesConfig, TaggingLevel};
use mt_core::corpus;
use mt_core::exit_codes::ExitCode;
use mt_core::logging::init_logging;
use mt_core::tokenize::{self, TokenizerConfig};
use mt_report::{ReportConfig, ReportData, ReportError, ReportGenerator};
use std::path::PathBuf;
use std::process;
use tracing::error;

/// Mail Triage - spam/ham classification and evaluation
#[derive(Parser, Debug)]
#[command(name = "mt-core")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the training and test corpora
    path: PathBuf,

    /// Subdirectory of PATH with training data
    #[arg(long, default_value = "train")]
    train_path: String,

    /// Subdirectory of PATH with test data
    #[arg(long, default_value = "test")]
    test_path: String,

    /// Classification algorithm
    #[arg(short = 'a', long, value_enum, default_value_t = Algorithm::Knn)]
    algorithm: Algorithm,

    /// Neighbors consulted per KNN prediction
    #[arg(short, long, default_value_t = 3)]
    k: usize,

    /// Additive-smoothing constant for Naive Bayes
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Token namespacing for Naive Bayes
    #[arg(long, value_enum, default_value_t = TaggingLevel::None)]
    tagging: TaggingLevel,

    /// Remove common English stop words during wrangling
    #[arg(short = 's', long)]
    stopwords: bool,

    /// Keep duplicate tokens within the subject and within each body line
    #[arg(long)]
    keep_duplicates: bool,

    /// Output format for the report
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print only the confusion matrix and statistics, no per-message lines
    #[arg(long)]
    summary_only: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Cosine-similarity k-nearest-neighbors
    Knn,
    /// Multinomial Naive Bayes
    Nb,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Knn => write!(f, "knn"),
            Algorithm::Nb => write!(f, "nb"),
        }
    }
}

fn validate(cli: &Cli) -> Result<(), String> {
    if cli.algorithm == Algorithm::Knn && cli.k == 0 {
        return Err("-k must be at least 1".to_string());
    }
    if cli.algorithm == Algorithm::Nb && !cli.alpha.is_finite() {
        return Err("--alpha must be a finite number".to_string());
    }
    if cli.algorithm == Algorithm::Nb && cli.alpha < 0.0 {
        return Err("--alpha must be non-negative".to_string());
    }
    Ok(())
}

fn run(cli: &Cli) -> mt_common::Result<String> {
    let train_dir = cli.path.join(&cli.train_path);
    let test_dir = cli.path.join(&cli.test_path);

    let train = corpus::load_dir(&train_dir)?;
    if train.is_empty() {
        return Err(Error::EmptyCorpus(format!(
            "no usable training messages in '{}'",
            train_dir.display()
        )));
    }
    let test = corpus::load_dir(&test_dir)?;

    let tokenizer = TokenizerConfig {
        remove_duplicates: !cli.keep_duplicates,
        remove_stop_words: cli.stopwords,
    };
    let train_tokens = tokenize::wrangle(&train.messages, &tokenizer);
    let test_tokens = tokenize::wrangle(&test.messages, &tokenizer);

    let (algorithm, evaluation) = match cli.algorithm {
        Algorithm::Knn => {
            let knn = Knn::new(train_tokens, cli.k);
            (format!("KNN (k = {})", cli.k), knn.evaluate(&test_tokens)?)
        }
        Algorithm::Nb => {
            let config = NaiveBayesConfig {
                alpha: cli.alpha,
                tagging: cli.tagging,
            };
            let mut nb = NaiveBayes::with_trace(config, Box::new(LogTrace::new(cli.verbose)));
            nb.train(&train_tokens);
            ("Naive Bayes".to_string(), nb.evaluate(&test_tokens)?)
        }
    };

    let mut report_config = ReportConfig::default();
    if cli.summary_only {
        report_config = report_config.without_messages();
    }
    let generator = ReportGenerator::new(report_config);
    let data = ReportData::new(algorithm, evaluation);

    generator.render(&data, cli.format).map_err(|e| match e {
        ReportError::Json(e) => Error::Json(e),
        ReportError::Io(e) => Error::Io(e),
        ReportError::MissingData(reason) => Error::Corpus(reason),
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.no_color);

    if let Err(message) = validate(&cli) {
        eprintln!("error: {message}");
        process::exit(ExitCode::UsageError.as_i32());
    }

    match run(&cli) {
        Ok(report) => {
            println!("{report}");
            process::exit(ExitCode::Success.as_i32());
        }
        Err(e) => {
            error!(code = e.code(), category = %e.category(), "{e}");
            process::exit(ExitCode::from_error(&e).as_i32());
        }
    }
}
