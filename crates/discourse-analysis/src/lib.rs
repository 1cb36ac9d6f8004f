//! Discourse analysis over a corpus of official documents.
//!
//! The pipeline turns an immutable [`Corpus`](discourse_corpus::Corpus) into
//! tables describing its vocabulary, latent topics, rhetorical framing and
//! term co-occurrence structure:
//!
//! 1. **Tokenization**: split, lowercase and filter raw text into unigrams and n-grams
//! 2. **Term index**: per-document term counts and the document-term matrix
//! 3. **TF-IDF**: the terms that set each document apart
//! 4. **Topics**: LDA fitted by collapsed Gibbs sampling
//! 5. **Framing**: first-match-wins lexicon classification of every token
//! 6. **Co-occurrence**: a directed graph of frequent adjacent word pairs
//!
//! Every stage is deterministic for a given corpus, configuration and seed.

#![warn(missing_docs)]

mod cooccur;
mod error;
mod framing;
mod frequency;
mod index;
mod options;
mod pipeline;
mod stopwords;
mod tfidf;
mod tokenize;
mod topic;

pub use cooccur::{CooccurrenceEdge, CooccurrenceGraph, NodeStrength, PairCounts, count_pairs};
pub use error::{AnalysisError, ConfigurationError};
pub use framing::{
    CategoryCount, DocumentFraming, FrameTally, FramingClassifier, FramingReport,
};
pub use frequency::{TermFrequencies, TermFrequency};
pub use index::{DocumentTermMatrix, DocumentTerms, TermCount, TermIndex};
pub use options::AnalysisOptions;
pub use pipeline::{Artifacts, Pipeline};
pub use stopwords::{StopwordLanguage, Stopwords};
pub use tfidf::{TfIdfScore, TfIdfTable};
pub use tokenize::{
    DEFAULT_NGRAM_SIZE, NGram, NGrams, Token, Tokenizer, Unigrams, Words, words,
};
pub use topic::{
    DocumentTopic, LdaParams, TopicDiagnostics, TopicModel, TopicSummary, TopicTerm,
};
