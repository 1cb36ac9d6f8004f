//! Configuration system for discourse.
//!
//! discourse uses TOML configuration files named `.discourse.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.discourse.toml` files found, then loading `~/.discourse.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawCorpusSettings, RawFramingCategory, RawFramingSettings, RawFrequencySettings,
    RawGraphSettings, RawStopwordSettings, RawTfIdfSettings, RawTopicSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_corpus_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default include patterns when none are specified.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.txt", "**/*.md"];

/// Top-level merged configuration for discourse.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.discourse.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the documents live.
    pub corpus: CorpusSettings,
    /// Stopword configuration.
    pub stopwords: StopwordSettings,
    /// TF-IDF ranking settings.
    pub tfidf: TfIdfSettings,
    /// Topic model settings.
    pub topics: TopicSettings,
    /// Co-occurrence graph settings.
    pub graph: GraphSettings,
    /// Corpus-wide term frequency settings.
    pub frequencies: FrequencySettings,
    /// Framing lexicons.
    pub framing: FramingSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.discourse.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A corpus path that is unset, missing, or not a directory
    /// - Include patterns that don't match any files
    /// - Framing with no categories
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.discourse.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            corpus: SerializableCorpusSettings::from(&self.corpus),
            stopwords: self.stopwords.clone(),
            tfidf: self.tfidf.clone(),
            topics: self.topics.clone(),
            graph: self.graph.clone(),
            frequencies: self.frequencies.clone(),
            framing: self.framing.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Corpus location and file selection.
#[derive(Debug, Clone)]
pub struct CorpusSettings {
    /// Resolved corpus directory, if one was configured.
    pub path: Option<PathBuf>,
    /// Include patterns relative to the corpus directory.
    pub include: Vec<String>,
    /// Exclude patterns relative to the corpus directory.
    pub exclude: Vec<String>,
    /// Upper bound on the number of documents in one run.
    pub max_documents: Option<usize>,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            path: None,
            include: DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            exclude: Vec::new(),
            max_documents: None,
        }
    }
}

/// Stopword configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StopwordSettings {
    /// Base stopword language (`none` disables the base set).
    pub language: String,
    /// Extra domain-specific stopwords.
    pub domain: Vec<String>,
}

impl Default for StopwordSettings {
    fn default() -> Self {
        Self {
            language: String::from("portuguese"),
            domain: Vec::new(),
        }
    }
}

/// TF-IDF ranking settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TfIdfSettings {
    /// Terms reported per document.
    pub top_n: usize,
}

impl Default for TfIdfSettings {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Topic model settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TopicSettings {
    /// Number of topics to fit.
    pub count: usize,
    /// Seed for the sampler.
    pub seed: u64,
    /// Gibbs sweeps over the corpus.
    pub iterations: usize,
    /// Terms reported per topic.
    pub top_terms: usize,
    /// Document-topic prior; `1 / count` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Topic-term prior.
    pub beta: f64,
    /// Relative log-likelihood change treated as converged.
    pub tolerance: f64,
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self {
            count: 5,
            seed: 42,
            iterations: 1000,
            top_terms: 10,
            alpha: None,
            beta: 0.01,
            tolerance: 1e-4,
        }
    }
}

/// Co-occurrence graph settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphSettings {
    /// An adjacent pair becomes an edge only when its count exceeds this.
    pub threshold: u64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self { threshold: 10 }
    }
}

/// Corpus-wide term frequency settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FrequencySettings {
    /// Terms reported.
    pub top_n: usize,
}

impl Default for FrequencySettings {
    fn default() -> Self {
        Self { top_n: 50 }
    }
}

/// Framing lexicons, checked in order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FramingSettings {
    /// Reject lexicons whose entries overlap across categories.
    pub require_disjoint: bool,
    /// Categories in priority order.
    #[serde(rename = "category")]
    pub categories: Vec<FramingCategory>,
}

impl Default for FramingSettings {
    fn default() -> Self {
        Self {
            require_disjoint: true,
            categories: vec![
                FramingCategory::new(
                    "control",
                    &[
                        "fiscaliz", "puni", "sanç", "penal", "multa", "infraç", "vigil", "coerç",
                        "repress", "policia",
                    ],
                ),
                FramingCategory::new(
                    "support",
                    &[
                        "apoio", "capacita", "assist", "acolh", "inclus", "proteç", "cuidado",
                        "orienta", "educa", "promo",
                    ],
                ),
            ],
        }
    }
}

/// A named framing lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FramingCategory {
    /// Category label.
    pub name: String,
    /// Substrings that place a token in this category.
    pub terms: Vec<String>,
}

impl FramingCategory {
    /// Creates a category from a name and its lexicon entries.
    pub fn new(name: &str, terms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            terms: terms.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Corpus settings.
    corpus: SerializableCorpusSettings,
    /// Stopword settings.
    stopwords: StopwordSettings,
    /// TF-IDF settings.
    tfidf: TfIdfSettings,
    /// Topic settings.
    topics: TopicSettings,
    /// Graph settings.
    graph: GraphSettings,
    /// Frequency settings.
    frequencies: FrequencySettings,
    /// Framing settings; serialized last so its array of tables follows the plain tables.
    framing: FramingSettings,
}

/// Corpus settings with the path rendered as a string.
#[derive(Serialize)]
struct SerializableCorpusSettings {
    /// Corpus directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    /// Include patterns.
    include: Vec<String>,
    /// Exclude patterns.
    exclude: Vec<String>,
    /// Document bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_documents: Option<usize>,
}

impl From<&CorpusSettings> for SerializableCorpusSettings {
    fn from(corpus: &CorpusSettings) -> Self {
        Self {
            path: corpus.path.as_ref().map(|p| p.display().to_string()),
            include: corpus.include.clone(),
            exclude: corpus.exclude.clone(),
            max_documents: corpus.max_documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert!(config.corpus.path.is_none());
        assert_eq!(config.corpus.include, vec!["**/*.txt", "**/*.md"]);
        assert_eq!(config.stopwords.language, "portuguese");
        assert_eq!(config.tfidf.top_n, 5);
        assert_eq!(config.topics.count, 5);
        assert_eq!(config.topics.seed, 42);
        assert!(config.topics.alpha.is_none());
        assert_eq!(config.graph.threshold, 10);
        assert_eq!(config.frequencies.top_n, 50);
        assert!(config.framing.require_disjoint);
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_default_framing_order() {
        let framing = FramingSettings::default();
        let names: Vec<&str> = framing.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["control", "support"]);
    }

    #[test]
    fn test_settings_to_toml_round_trips() {
        let config = Config::default();
        let toml = config.settings_to_toml();

        assert!(toml.contains("[corpus]"));
        assert!(toml.contains("[topics]"));
        assert!(toml.contains("[[framing.category]]"));
        assert!(toml.contains("threshold = 10"));

        let parsed = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        let categories = parsed.framing.unwrap().categories.unwrap();
        assert_eq!(categories[0].name, "control");
        assert_eq!(parsed.topics.unwrap().count, Some(5));
    }
}
