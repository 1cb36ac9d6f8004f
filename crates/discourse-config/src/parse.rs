//! Configuration file parsing.
//!
//! Parses individual `.discourse.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Corpus location section.
    pub corpus: Option<RawCorpusSettings>,
    /// Stopword section.
    pub stopwords: Option<RawStopwordSettings>,
    /// TF-IDF ranking section.
    pub tfidf: Option<RawTfIdfSettings>,
    /// Topic model section.
    pub topics: Option<RawTopicSettings>,
    /// Co-occurrence graph section.
    pub graph: Option<RawGraphSettings>,
    /// Corpus-wide term frequency section.
    pub frequencies: Option<RawFrequencySettings>,
    /// Framing lexicon section.
    pub framing: Option<RawFramingSettings>,
}

/// Raw corpus settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCorpusSettings {
    /// Directory holding the documents, relative to the config file.
    pub path: Option<String>,
    /// Include patterns. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
    /// Exclude patterns. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
    /// Upper bound on the number of documents in one run.
    pub max_documents: Option<usize>,
}

/// Raw stopword settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStopwordSettings {
    /// Base stopword language.
    pub language: Option<String>,
    /// Extra domain-specific stopwords.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub domain: Option<Vec<String>>,
}

/// Raw TF-IDF settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTfIdfSettings {
    /// Terms reported per document.
    pub top_n: Option<usize>,
}

/// Raw topic model settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTopicSettings {
    /// Number of topics.
    pub count: Option<usize>,
    /// Sampler seed.
    pub seed: Option<u64>,
    /// Gibbs sweeps over the corpus.
    pub iterations: Option<usize>,
    /// Terms reported per topic.
    pub top_terms: Option<usize>,
    /// Document-topic prior.
    pub alpha: Option<f64>,
    /// Topic-term prior.
    pub beta: Option<f64>,
    /// Relative log-likelihood change treated as converged.
    pub tolerance: Option<f64>,
}

/// Raw co-occurrence graph settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGraphSettings {
    /// Minimum count an edge must exceed.
    pub threshold: Option<u64>,
}

/// Raw term frequency settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFrequencySettings {
    /// Terms reported corpus-wide.
    pub top_n: Option<usize>,
}

/// Raw framing settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFramingSettings {
    /// Reject lexicons whose entries overlap across categories.
    pub require_disjoint: Option<bool>,
    /// Categories in priority order (`[[framing.category]]`).
    #[serde(rename = "category")]
    pub categories: Option<Vec<RawFramingCategory>>,
}

/// A framing category as written in TOML.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawFramingCategory {
    /// Category label.
    pub name: String,
    /// Substrings that place a token in this category.
    #[serde_as(as = "OneOrMany<_>")]
    pub terms: Vec<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
