use camxuc_classifiers::ClassifierBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "camxuc")]
#[command(
    author,
    version,
    about = "Vietnamese sentiment assistant (phân loại cảm xúc tiếng Việt)"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "camxuc.yaml", env = "CAMXUC_CONFIG", global = true)]
    pub config: String,

    /// Classifier backend: lexicon or http
    #[arg(long, value_parser = parse_backend, global = true)]
    pub backend: Option<ClassifierBackend>,

    /// Inference endpoint URL (http backend)
    #[arg(long, env = "CAMXUC_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// History file path
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one sentence and show recent history
    Classify {
        /// Sentence to classify (words are joined with single spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show recent classifications
    History {
        /// Number of records (defaults to history.limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Classify sentences read line by line from stdin
    Interactive,
}

fn parse_backend(s: &str) -> Result<ClassifierBackend, String> {
    s.parse()
}
