//! Validated analysis options.

use discourse_config::{Config, FramingCategory, FramingSettings, TopicSettings};

use crate::{ConfigurationError, LdaParams, StopwordLanguage};

/// Everything the pipeline needs besides the corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Base stopword language.
    pub language: StopwordLanguage,
    /// Extra stopwords.
    pub domain_stopwords: Vec<String>,
    /// TF-IDF terms reported per document.
    pub top_n_terms: usize,
    /// Topic model parameters.
    pub lda: LdaParams,
    /// Terms reported per topic.
    pub topic_top_terms: usize,
    /// Adjacent pairs need a count above this to become graph edges.
    pub bigram_threshold: u64,
    /// Framing categories in priority order.
    pub framing: Vec<FramingCategory>,
    /// Reject overlapping lexicons.
    pub require_disjoint: bool,
    /// Corpus-wide frequencies reported.
    pub frequency_top_n: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        let topics = TopicSettings::default();
        let framing = FramingSettings::default();
        Self {
            language: StopwordLanguage::default(),
            domain_stopwords: Vec::new(),
            top_n_terms: 5,
            lda: lda_params(&topics),
            topic_top_terms: topics.top_terms,
            bigram_threshold: 10,
            framing: framing.categories,
            require_disjoint: framing.require_disjoint,
            frequency_top_n: 50,
        }
    }
}

impl AnalysisOptions {
    /// Maps merged configuration into options and validates them.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let options = Self {
            language: config.stopwords.language.parse()?,
            domain_stopwords: config.stopwords.domain.clone(),
            top_n_terms: config.tfidf.top_n,
            lda: lda_params(&config.topics),
            topic_top_terms: config.topics.top_terms,
            bigram_threshold: config.graph.threshold,
            framing: config.framing.categories.clone(),
            require_disjoint: config.framing.require_disjoint,
            frequency_top_n: config.frequencies.top_n,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks counts, thresholds and priors.
    ///
    /// Framing lexicons are checked when the classifier is compiled.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let positive = [
            ("tfidf.top_n", self.top_n_terms),
            ("topics.top_terms", self.topic_top_terms),
            ("frequencies.top_n", self.frequency_top_n),
        ];
        if let Some(&(name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigurationError::NonPositive { name });
        }
        if self.bigram_threshold == 0 {
            return Err(ConfigurationError::NonPositive {
                name: "graph.threshold",
            });
        }
        self.lda.validate()
    }
}

/// Copies topic settings into sampler parameters.
fn lda_params(topics: &TopicSettings) -> LdaParams {
    LdaParams {
        topics: topics.count,
        seed: topics.seed,
        iterations: topics.iterations,
        alpha: topics.alpha,
        beta: topics.beta,
        tolerance: topics.tolerance,
    }
}
