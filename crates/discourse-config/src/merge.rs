//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, CorpusSettings, FramingCategory, FramingSettings, FrequencySettings,
    GraphSettings, StopwordSettings, TfIdfSettings, TopicSettings,
    parse::{
        RawConfig, RawCorpusSettings, RawFramingSettings, RawStopwordSettings, RawTopicSettings,
    },
    resolve::resolve_corpus_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory the config file lives in; relative paths resolve against it.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Lists (include/exclude patterns, domain stopwords, framing categories): the
///   highest-precedence file that defines the list wins it completely
/// - The corpus path resolves against the directory of the file that defines it
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let corpus = merge_corpus_settings(configs)?;
    let stopwords = merge_stopword_settings(configs);
    let topics = merge_topic_settings(configs);
    let framing = merge_framing_settings(configs);

    let mut tfidf = TfIdfSettings::default();
    let mut graph = GraphSettings::default();
    let mut frequencies = FrequencySettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(v) = parsed.config.tfidf.as_ref().and_then(|t| t.top_n) {
            tfidf.top_n = v;
        }
        if let Some(v) = parsed.config.graph.as_ref().and_then(|g| g.threshold) {
            graph.threshold = v;
        }
        if let Some(v) = parsed.config.frequencies.as_ref().and_then(|f| f.top_n) {
            frequencies.top_n = v;
        }
    }

    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        corpus,
        stopwords,
        tfidf,
        topics,
        graph,
        frequencies,
        framing,
        config_root,
    })
}

/// Merges corpus settings, resolving the path against its defining file.
fn merge_corpus_settings(configs: &[ParsedConfig]) -> Result<CorpusSettings, ConfigError> {
    let mut result = CorpusSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref corpus) = parsed.config.corpus {
            apply_raw_corpus(&mut result, corpus, parsed)?;
        }
    }

    Ok(result)
}

/// Applies raw corpus settings to result, overwriting any present values.
///
/// An empty path or a zero document bound is rejected with the defining file.
fn apply_raw_corpus(
    result: &mut CorpusSettings,
    raw: &RawCorpusSettings,
    parsed: &ParsedConfig,
) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidCorpus {
        file: parsed.path.clone(),
        reason,
    };

    if let Some(ref path) = raw.path {
        if path.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        result.path = Some(resolve_corpus_path(path, parsed.dir())?);
    }
    if let Some(ref v) = raw.include {
        result.include = v.clone();
    }
    if let Some(ref v) = raw.exclude {
        result.exclude = v.clone();
    }
    if let Some(v) = raw.max_documents {
        if v == 0 {
            return Err(invalid("max_documents must be at least 1"));
        }
        result.max_documents = Some(v);
    }
    Ok(())
}

/// Merges stopword settings.
fn merge_stopword_settings(configs: &[ParsedConfig]) -> StopwordSettings {
    let mut result = StopwordSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref stopwords) = parsed.config.stopwords {
            apply_raw_stopwords(&mut result, stopwords);
        }
    }

    result
}

/// Applies raw stopword settings to result.
fn apply_raw_stopwords(result: &mut StopwordSettings, raw: &RawStopwordSettings) {
    if let Some(ref v) = raw.language {
        result.language = v.clone();
    }
    if let Some(ref v) = raw.domain {
        result.domain = v.clone();
    }
}

/// Merges topic model settings.
fn merge_topic_settings(configs: &[ParsedConfig]) -> TopicSettings {
    let mut result = TopicSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref topics) = parsed.config.topics {
            apply_raw_topics(&mut result, topics);
        }
    }

    result
}

/// Applies raw topic settings to result.
fn apply_raw_topics(result: &mut TopicSettings, raw: &RawTopicSettings) {
    if let Some(v) = raw.count {
        result.count = v;
    }
    if let Some(v) = raw.seed {
        result.seed = v;
    }
    if let Some(v) = raw.iterations {
        result.iterations = v;
    }
    if let Some(v) = raw.top_terms {
        result.top_terms = v;
    }
    if let Some(v) = raw.alpha {
        result.alpha = Some(v);
    }
    if let Some(v) = raw.beta {
        result.beta = v;
    }
    if let Some(v) = raw.tolerance {
        result.tolerance = v;
    }
}

/// Merges framing settings.
fn merge_framing_settings(configs: &[ParsedConfig]) -> FramingSettings {
    let mut result = FramingSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref framing) = parsed.config.framing {
            apply_raw_framing(&mut result, framing);
        }
    }

    result
}

/// Applies raw framing settings to result.
fn apply_raw_framing(result: &mut FramingSettings, raw: &RawFramingSettings) {
    if let Some(v) = raw.require_disjoint {
        result.require_disjoint = v;
    }
    if let Some(ref categories) = raw.categories {
        result.categories = categories
            .iter()
            .map(|c| FramingCategory {
                name: c.name.clone(),
                terms: c.terms.clone(),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config_str, test_support::TestDir};

    /// Parses TOML into a `ParsedConfig` located at `path`.
    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path,
            config: parse_config_str(toml, Path::new("test")).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let result = merge_configs(&[]).unwrap();
        assert_eq!(result.topics.count, 5);
        assert!(result.corpus.path.is_none());
    }

    #[test]
    fn test_merge_single_config_resolves_corpus() {
        let test_dir = TestDir::new();
        let corpus = test_dir.dir("docs");

        let config = parsed(
            test_dir.path().join(".discourse.toml"),
            r#"
[corpus]
path = "./docs"

[topics]
count = 8
"#,
        );

        let result = merge_configs(&[config]).unwrap();
        assert_eq!(result.corpus.path, Some(corpus.canonicalize().unwrap()));
        assert_eq!(result.corpus.include, vec!["**/*.txt", "**/*.md"]);
        assert_eq!(result.topics.count, 8);
        assert_eq!(result.config_root.as_deref(), Some(test_dir.path()));
    }

    #[test]
    fn test_merge_scalar_override() {
        let test_dir = TestDir::new();

        let high = parsed(
            test_dir.path().join("project/.discourse.toml"),
            "[graph]\nthreshold = 3\n",
        );
        let low = parsed(
            test_dir.path().join(".discourse.toml"),
            "[graph]\nthreshold = 20\n\n[tfidf]\ntop_n = 9\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert_eq!(result.graph.threshold, 3);
        assert_eq!(result.tfidf.top_n, 9);
    }

    #[test]
    fn test_merge_framing_categories_replaced_wholesale() {
        let test_dir = TestDir::new();

        let high = parsed(
            test_dir.path().join("project/.discourse.toml"),
            r#"
[[framing.category]]
name = "security"
terms = ["segur"]
"#,
        );
        let low = parsed(
            test_dir.path().join(".discourse.toml"),
            r#"
[framing]
require_disjoint = false

[[framing.category]]
name = "control"
terms = ["fiscaliz"]

[[framing.category]]
name = "support"
terms = ["apoio"]
"#,
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert!(!result.framing.require_disjoint);
        assert_eq!(
            result.framing.categories,
            vec![FramingCategory::new("security", &["segur"])]
        );
    }

    #[test]
    fn test_merge_domain_stopwords_closest_wins() {
        let test_dir = TestDir::new();

        let high = parsed(
            test_dir.path().join("a/.discourse.toml"),
            "[stopwords]\ndomain = [\"programa\"]\n",
        );
        let low = parsed(
            test_dir.path().join(".discourse.toml"),
            "[stopwords]\nlanguage = \"english\"\ndomain = [\"report\", \"section\"]\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert_eq!(result.stopwords.language, "english");
        assert_eq!(result.stopwords.domain, vec!["programa"]);
    }

    #[test]
    fn test_corpus_path_resolves_against_defining_file() {
        let test_dir = TestDir::new();
        let corpus = test_dir.dir("shared/corpus");

        let high = parsed(
            test_dir.path().join("project/.discourse.toml"),
            "[topics]\nseed = 1\n",
        );
        let low = parsed(
            test_dir.path().join("shared/.discourse.toml"),
            "[corpus]\npath = \"corpus\"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert_eq!(result.corpus.path, Some(corpus.canonicalize().unwrap()));
        assert_eq!(result.topics.seed, 1);
    }

    #[test]
    fn test_empty_corpus_path_is_rejected() {
        let config = parsed(
            PathBuf::from("/project/.discourse.toml"),
            "[corpus]\npath = \"\"\n",
        );

        let err = merge_configs(&[config]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidCorpus { ref file, .. } if file == Path::new("/project/.discourse.toml")
        ));
    }

    #[test]
    fn test_zero_max_documents_is_rejected() {
        let config = parsed(
            PathBuf::from("/project/.discourse.toml"),
            "[corpus]\nmax_documents = 0\n",
        );

        assert!(matches!(
            merge_configs(&[config]),
            Err(ConfigError::InvalidCorpus { .. })
        ));
    }
}
