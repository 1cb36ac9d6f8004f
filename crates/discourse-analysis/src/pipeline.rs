//! The end-to-end analysis run.
//!
//! A [`Pipeline`] holds the validated options together with the compiled
//! stopword set and framing classifier. Each stage can be run on its own, or
//! [`Pipeline::run`] executes all of them over one corpus and gathers the
//! results into [`Artifacts`].

use discourse_corpus::Corpus;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    AnalysisError, AnalysisOptions, CooccurrenceEdge, CooccurrenceGraph, DocumentTopic,
    FramingClassifier, FramingReport, NodeStrength, Stopwords, TermCount, TermFrequencies,
    TermFrequency, TermIndex, TfIdfScore, TfIdfTable, TopicDiagnostics, TopicModel, TopicSummary,
    TopicTerm, Tokenizer,
};

/// Every table produced by one run.
#[derive(Debug, Clone, Serialize)]
pub struct Artifacts {
    /// Documents analyzed.
    pub documents: usize,
    /// Per-document term counts.
    pub term_counts: Vec<TermCount>,
    /// Top TF-IDF terms of each document.
    pub tfidf: Vec<TfIdfScore>,
    /// Top terms of each topic.
    pub topics: Vec<TopicSummary>,
    /// Full topic-term distributions.
    pub topic_terms: Vec<TopicTerm>,
    /// Document-topic mixtures.
    pub document_topics: Vec<DocumentTopic>,
    /// How the topic fit ended.
    pub topic_diagnostics: TopicDiagnostics,
    /// Framing totals and per-document breakdown.
    pub framing: FramingReport,
    /// Co-occurrence edges, heaviest first.
    pub cooccurrence: Vec<CooccurrenceEdge>,
    /// Weighted degree of each graph node.
    pub node_strengths: Vec<NodeStrength>,
    /// Most frequent terms across the corpus.
    pub frequencies: Vec<TermFrequency>,
}

/// Runs analysis stages with a fixed set of options.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Validated options.
    options: AnalysisOptions,
    /// Compiled stopword set.
    stopwords: Stopwords,
    /// Compiled framing lexicons.
    classifier: FramingClassifier,
}

impl Pipeline {
    /// Validates `options` and compiles the stopword set and framing lexicons.
    pub fn new(options: AnalysisOptions) -> Result<Self, AnalysisError> {
        options.validate()?;
        let stopwords = Stopwords::new(options.language, &options.domain_stopwords);
        let classifier = FramingClassifier::new(&options.framing, options.require_disjoint)?;
        classifier.check_stopwords(&stopwords)?;

        debug!(
            language = %options.language,
            stopwords = stopwords.len(),
            categories = options.framing.len(),
            "pipeline ready"
        );

        Ok(Self {
            options,
            stopwords,
            classifier,
        })
    }

    /// Returns the options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Returns the stopword set in use.
    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Returns a tokenizer over the pipeline's stopword set.
    pub fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.stopwords)
    }

    /// Counts terms per document.
    pub fn term_index(&self, corpus: &Corpus) -> Result<TermIndex, AnalysisError> {
        TermIndex::build(corpus, &self.tokenizer())
    }

    /// Scores TF-IDF for every document.
    pub fn tfidf(&self, corpus: &Corpus) -> Result<TfIdfTable, AnalysisError> {
        Ok(TfIdfTable::compute(&self.term_index(corpus)?))
    }

    /// Fits the topic model.
    pub fn topics(&self, corpus: &Corpus) -> Result<TopicModel, AnalysisError> {
        let index = self.term_index(corpus)?;
        TopicModel::fit(&index.matrix(), &self.options.lda)
    }

    /// Classifies tokens into framing categories.
    pub fn framing(&self, corpus: &Corpus) -> Result<FramingReport, AnalysisError> {
        self.classifier.aggregate(corpus, &self.tokenizer())
    }

    /// Builds the bigram co-occurrence graph.
    pub fn cooccurrence(&self, corpus: &Corpus) -> Result<CooccurrenceGraph, AnalysisError> {
        CooccurrenceGraph::build(corpus, &self.tokenizer(), self.options.bigram_threshold)
    }

    /// Totals term counts across the corpus.
    pub fn frequencies(&self, corpus: &Corpus) -> Result<TermFrequencies, AnalysisError> {
        Ok(TermFrequencies::from_index(&self.term_index(corpus)?))
    }

    /// Runs every stage over `corpus`.
    pub fn run(&self, corpus: &Corpus) -> Result<Artifacts, AnalysisError> {
        if corpus.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        let tokenizer = self.tokenizer();
        let index = TermIndex::build(corpus, &tokenizer)?;
        let tfidf = TfIdfTable::compute(&index);
        let frequencies = TermFrequencies::from_index(&index);

        let (model, (framing, graph)) = rayon::join(
            || TopicModel::fit(&index.matrix(), &self.options.lda),
            || {
                rayon::join(
                    || self.classifier.aggregate(corpus, &tokenizer),
                    || {
                        CooccurrenceGraph::build(
                            corpus,
                            &tokenizer,
                            self.options.bigram_threshold,
                        )
                    },
                )
            },
        );
        let (model, framing, graph) = (model?, framing?, graph?);

        info!(
            documents = corpus.len(),
            vocabulary = index.vocabulary().len(),
            topics = model.topic_count(),
            converged = model.diagnostics().converged,
            edges = graph.edge_count(),
            "analysis complete"
        );

        Ok(Artifacts {
            documents: corpus.len(),
            term_counts: index.term_counts(),
            tfidf: tfidf.top_n(self.options.top_n_terms),
            topics: model.summaries(self.options.topic_top_terms),
            topic_terms: model.term_weights(),
            document_topics: model.document_topics(),
            topic_diagnostics: model.diagnostics(),
            framing,
            cooccurrence: graph.edges(),
            node_strengths: graph.strengths(),
            frequencies: frequencies.top(self.options.frequency_top_n).to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use discourse_config::FramingCategory;

    use super::*;
    use crate::{ConfigurationError, LdaParams, StopwordLanguage};

    /// Options without a base stopword list.
    fn options() -> AnalysisOptions {
        AnalysisOptions {
            language: StopwordLanguage::None,
            lda: LdaParams {
                topics: 2,
                iterations: 50,
                ..LdaParams::default()
            },
            bigram_threshold: 1,
            framing: vec![
                FramingCategory::new("control", &["fiscaliz"]),
                FramingCategory::new("support", &["apoio"]),
            ],
            ..AnalysisOptions::default()
        }
    }

    #[test]
    fn run_produces_every_artifact() {
        let corpus = Corpus::from_pairs([
            ("a.txt", "apoio social apoio social fiscalização escolar"),
            ("b.txt", "apoio social capacitação docente"),
        ])
        .unwrap();
        let pipeline = Pipeline::new(options()).unwrap();

        let artifacts = pipeline.run(&corpus).unwrap();

        assert_eq!(artifacts.documents, 2);
        assert!(!artifacts.term_counts.is_empty());
        assert!(!artifacts.tfidf.is_empty());
        assert_eq!(artifacts.topics.len(), 2);
        assert_eq!(artifacts.document_topics.len(), 4);
        assert_eq!(artifacts.framing.count("support"), Some(3));
        assert_eq!(artifacts.cooccurrence[0].source, "apoio");
        assert_eq!(artifacts.cooccurrence[0].target, "social");
        assert_eq!(artifacts.cooccurrence[0].count, 3);
        assert_eq!(artifacts.frequencies[0].term, "apoio");
    }

    #[test]
    fn empty_corpus_fails_fast() {
        let pipeline = Pipeline::new(options()).unwrap();
        assert!(matches!(
            pipeline.run(&Corpus::default()),
            Err(AnalysisError::EmptyCorpus)
        ));
    }

    #[test]
    fn invalid_lexicons_fail_construction() {
        let options = AnalysisOptions {
            framing: vec![FramingCategory::new("control", &[])],
            ..options()
        };
        assert!(matches!(
            Pipeline::new(options),
            Err(AnalysisError::Configuration(
                ConfigurationError::EmptyLexicon { .. }
            ))
        ));
    }

    #[test]
    fn lexicon_entry_that_is_a_stopword_fails_construction() {
        let options = AnalysisOptions {
            domain_stopwords: vec!["Apoio".into()],
            ..options()
        };
        let Err(AnalysisError::Configuration(err)) = Pipeline::new(options) else {
            panic!("expected a configuration error");
        };
        assert_eq!(
            err,
            ConfigurationError::StopwordEntry {
                category: "support".into(),
                entry: "apoio".into(),
            }
        );
    }

    #[test]
    fn default_options_compile() {
        let pipeline = Pipeline::new(AnalysisOptions::default()).unwrap();
        assert!(pipeline.stopwords().contains("de"));
        assert!(!pipeline.stopwords().contains("apoio"));
    }

    #[test]
    fn domain_stopwords_are_filtered() {
        let options = AnalysisOptions {
            domain_stopwords: vec!["social".into()],
            ..options()
        };
        let pipeline = Pipeline::new(options).unwrap();
        let corpus = Corpus::from_pairs([("a.txt", "apoio social")]).unwrap();

        let index = pipeline.term_index(&corpus).unwrap();
        assert!(!index.documents()[0].counts.contains_key("social"));
    }
}
