//! Shared helpers for command implementations.

use std::{fmt::Display, process::ExitCode};

use discourse_analysis::{AnalysisOptions, Pipeline};
use discourse_config::Config;
use discourse_corpus::{Corpus, CorpusError, DirectorySource, DocumentSource};
use tracing::info;

use crate::cli::{args::AnalysisArgs, context::CommandContext, output::subheader};

/// The listing a `--top-n` flag resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopN {
    /// Terms per document in the TF-IDF table.
    TfIdf,
    /// Terms per topic.
    TopicTerms,
    /// Corpus-wide frequency listing.
    Frequencies,
}

/// Returns a copy of the loaded configuration with the command-line overrides applied.
///
/// A relative `--corpus` is resolved against the working directory.
pub fn apply_overrides(
    ctx: &CommandContext,
    args: &AnalysisArgs,
    target: Option<TopN>,
) -> Config {
    let mut config = ctx.config.clone();

    if let Some(corpus) = &args.corpus {
        config.corpus.path = Some(ctx.cwd.join(corpus));
    }
    if let Some(topics) = args.topics {
        config.topics.count = topics;
    }
    if let Some(seed) = args.seed {
        config.topics.seed = seed;
    }
    if let Some(threshold) = args.threshold {
        config.graph.threshold = threshold;
    }
    if let (Some(n), Some(target)) = (args.top_n, target) {
        match target {
            TopN::TfIdf => config.tfidf.top_n = n,
            TopN::TopicTerms => config.topics.top_terms = n,
            TopN::Frequencies => config.frequencies.top_n = n,
        }
    }

    config
}

/// Builds the pipeline and loads the corpus for an analysis command.
///
/// `target` names the listing `--top-n` resizes; commands without one ignore the flag.
///
/// Errors are reported on stderr; the caller only forwards the exit code.
pub fn prepare(
    ctx: &CommandContext,
    args: &AnalysisArgs,
    target: Option<TopN>,
) -> Result<(Pipeline, Corpus), ExitCode> {
    let config = apply_overrides(ctx, args, target);

    let options = AnalysisOptions::from_config(&config).map_err(|e| report_error(&e))?;
    let pipeline = Pipeline::new(options).map_err(|e| report_error(&e))?;

    let corpus = load_corpus(&config).map_err(|e| {
        eprintln!("error: {e}");
        if matches!(e, CorpusError::NoCorpusPath) {
            eprintln!(
                "Pass {} or set [corpus] path in .discourse.toml.",
                subheader("--corpus DIR")
            );
        }
        ExitCode::FAILURE
    })?;

    info!(documents = corpus.len(), "corpus loaded");
    Ok((pipeline, corpus))
}

/// Loads the configured corpus directory.
fn load_corpus(config: &Config) -> Result<Corpus, CorpusError> {
    DirectorySource::from_settings(&config.corpus)?.load()
}

/// Prints an analysis failure and returns the failing exit code.
pub fn report_error(error: &impl Display) -> ExitCode {
    eprintln!("error: {error}");
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// A context rooted at `/work` with default configuration.
    fn context() -> CommandContext {
        CommandContext {
            cwd: PathBuf::from("/work"),
            config: Config::default(),
        }
    }

    #[test]
    fn overrides_replace_configured_values() {
        let ctx = context();
        let args = AnalysisArgs {
            corpus: Some(PathBuf::from("docs")),
            topics: Some(3),
            seed: Some(7),
            threshold: Some(2),
            top_n: None,
        };

        let config = apply_overrides(&ctx, &args, Some(TopN::TfIdf));

        assert_eq!(config.corpus.path, Some(PathBuf::from("/work/docs")));
        assert_eq!(config.topics.count, 3);
        assert_eq!(config.topics.seed, 7);
        assert_eq!(config.graph.threshold, 2);
        assert_eq!(config.tfidf.top_n, ctx.config.tfidf.top_n);
    }

    #[test]
    fn top_n_resizes_only_its_target() {
        let ctx = context();
        let args = AnalysisArgs {
            top_n: Some(3),
            ..AnalysisArgs::default()
        };

        let config = apply_overrides(&ctx, &args, Some(TopN::TopicTerms));
        assert_eq!(config.topics.top_terms, 3);
        assert_eq!(config.tfidf.top_n, 5);
        assert_eq!(config.frequencies.top_n, 50);

        let config = apply_overrides(&ctx, &args, Some(TopN::Frequencies));
        assert_eq!(config.frequencies.top_n, 3);
        assert_eq!(config.topics.top_terms, 10);
    }

    #[test]
    fn absolute_corpus_path_is_kept() {
        let ctx = context();
        let args = AnalysisArgs {
            corpus: Some(PathBuf::from("/data/corpus")),
            ..AnalysisArgs::default()
        };

        let config = apply_overrides(&ctx, &args, Some(TopN::TfIdf));
        assert_eq!(config.corpus.path, Some(PathBuf::from("/data/corpus")));
    }
}
