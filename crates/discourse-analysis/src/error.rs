//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors produced by the analysis stages.
///
/// Every stage fails fast on these; none of them are retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A corpus-level stage received zero documents.
    #[error("corpus is empty")]
    EmptyCorpus,

    /// The corpus is too small for the requested topic model.
    #[error(
        "insufficient data for {topics} topics: {documents} documents with {vocabulary} distinct terms"
    )]
    InsufficientData {
        /// Documents in the matrix.
        documents: usize,
        /// Distinct terms in the matrix.
        vocabulary: usize,
        /// Requested topic count.
        topics: usize,
    },

    /// A parameter or lexicon is invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Invalid analysis parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// A count or threshold that must be positive was zero.
    #[error("{name} must be greater than zero")]
    NonPositive {
        /// Setting name.
        name: &'static str,
    },

    /// The stopword language is not recognised.
    #[error("unknown stopword language: {language}")]
    UnknownLanguage {
        /// The configured language.
        language: String,
    },

    /// A framing category has an empty name.
    #[error("framing category name is empty")]
    EmptyCategoryName,

    /// Two framing categories share a name.
    #[error("duplicate framing category: {name}")]
    DuplicateCategory {
        /// The repeated name.
        name: String,
    },

    /// A framing category has no entries.
    #[error("framing category '{name}' has no terms")]
    EmptyLexicon {
        /// Category name.
        name: String,
    },

    /// A framing category contains an empty entry.
    #[error("framing category '{name}' contains an empty term")]
    EmptyEntry {
        /// Category name.
        name: String,
    },

    /// Entries from two categories overlap, so category order would decide the label.
    #[error(
        "framing lexicons overlap: '{first_entry}' ({first}) and '{second_entry}' ({second})"
    )]
    OverlappingLexicons {
        /// Earlier category.
        first: String,
        /// Entry of the earlier category.
        first_entry: String,
        /// Later category.
        second: String,
        /// Entry of the later category.
        second_entry: String,
    },

    /// A framing entry is itself a stopword, so the whole word never reaches the classifier.
    #[error("framing term '{entry}' ({category}) is a stopword")]
    StopwordEntry {
        /// Category name.
        category: String,
        /// The filtered entry.
        entry: String,
    },

    /// A Dirichlet prior or tolerance is not a positive finite number.
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidPrior {
        /// Setting name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
