//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, fs, path::Path};

use globset::{Glob, GlobMatcher};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No corpus directory is configured.
    CorpusPathUnset,
    /// The corpus path does not exist.
    CorpusPathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The corpus path exists but is not a directory.
    CorpusPathNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// An include pattern doesn't match any files.
    IncludePatternMatchesNothing {
        /// Pattern that matched nothing.
        pattern: String,
    },
    /// No framing categories are defined, so every token is unclassified.
    NoFramingCategories,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorpusPathUnset => write!(f, "no corpus path is configured"),
            Self::CorpusPathMissing { path } => {
                write!(f, "corpus path does not exist: {path}")
            }
            Self::CorpusPathNotDirectory { path } => {
                write!(f, "corpus path is not a directory: {path}")
            }
            Self::IncludePatternMatchesNothing { pattern } => {
                write!(f, "include pattern '{pattern}' matches no files")
            }
            Self::NoFramingCategories => {
                write!(f, "no framing categories are defined")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.framing.categories.is_empty() {
        warnings.push(ConfigWarning::NoFramingCategories);
    }

    let Some(path) = config.corpus.path.as_deref() else {
        warnings.push(ConfigWarning::CorpusPathUnset);
        return warnings;
    };

    if !path.exists() {
        warnings.push(ConfigWarning::CorpusPathMissing {
            path: path.display().to_string(),
        });
        return warnings;
    }

    if !path.is_dir() {
        warnings.push(ConfigWarning::CorpusPathNotDirectory {
            path: path.display().to_string(),
        });
        return warnings;
    }

    for pattern in &config.corpus.include {
        if !pattern_matches_any_file(path, pattern) {
            warnings.push(ConfigWarning::IncludePatternMatchesNothing {
                pattern: pattern.clone(),
            });
        }
    }

    warnings
}

/// Checks if a glob pattern matches any files in a directory.
fn pattern_matches_any_file(corpus_path: &Path, pattern: &str) -> bool {
    let Ok(glob) = Glob::new(pattern) else {
        return false;
    };
    let matcher = glob.compile_matcher();

    walk_and_match(corpus_path, corpus_path, &matcher)
}

/// Recursively walks a directory and checks if any file matches the pattern.
fn walk_and_match(root: &Path, current: &Path, matcher: &GlobMatcher) -> bool {
    let Ok(entries) = fs::read_dir(current) else {
        return false;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        if path.is_file() && matcher.is_match(relative) {
            return true;
        }

        if path.is_dir() && walk_and_match(root, &path, matcher) {
            return true;
        }
    }

    false
}
