//! Clap argument definitions for the `discourse` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "discourse")]
#[command(about = "Discourse analysis of official document corpora")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override the corpus and analysis settings from configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Corpus directory, overriding [corpus] path
    #[arg(long, value_name = "DIR")]
    pub corpus: Option<PathBuf>,

    /// Number of topics [default: 5]
    #[arg(short = 'k', long)]
    pub topics: Option<usize>,

    /// Topic model seed [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Adjacent pairs need a count above this to become graph edges [default: 10]
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Rows reported per document, topic or listing
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,
}

/// Arguments for `discourse init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.discourse.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `discourse run`.
#[derive(Args, Debug, Clone)]
pub struct RunCommand {
    #[command(flatten)]
    /// Corpus and analysis overrides.
    pub analysis: AnalysisArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Write one JSON file per artifact into this directory
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// Arguments for single-stage commands.
#[derive(Args, Debug, Clone)]
pub struct StageCommand {
    #[command(flatten)]
    /// Corpus and analysis overrides.
    pub analysis: AnalysisArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Supported `discourse` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize discourse configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,

    /// Run every analysis stage over the corpus
    #[command(after_help = "\
EXAMPLES:
  discourse run --corpus ./documentos
  discourse run --topics 8 --seed 7 --json
  discourse run --out ./artifacts")]
    Run(RunCommand),

    /// Rank the most distinctive terms of each document
    Tfidf(StageCommand),

    /// Fit topics and show their top terms
    Topics(StageCommand),

    /// Count tokens per framing category
    Framing(StageCommand),

    /// Show the bigram co-occurrence graph
    Graph(StageCommand),

    /// Show the most frequent terms across the corpus
    Freq(StageCommand),
}

impl Commands {
    /// Returns true if the command must not fail on an invalid config file.
    pub fn skips_config(&self) -> bool {
        matches!(self, Self::Init(_))
    }
}

/// Parses process arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
