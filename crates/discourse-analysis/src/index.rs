//! Per-document term counts and the document-term matrix.
//!
//! Documents are tokenized in parallel and collected back in corpus order.
//! All maps are ordered, so every table derived from the index is
//! deterministic for a given corpus and stopword set.

use std::collections::BTreeMap;

use discourse_corpus::{Corpus, DocId};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{AnalysisError, Tokenizer};

/// Occurrences of one term in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    /// Document the term occurs in.
    pub document: DocId,
    /// Normalized term.
    pub term: String,
    /// Number of occurrences, always at least one.
    pub count: u32,
}

/// Term counts of a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTerms {
    /// Document id.
    pub id: DocId,
    /// Count per surviving term.
    pub counts: BTreeMap<String, u32>,
    /// Surviving unigram tokens in the document.
    pub total: u32,
}

impl DocumentTerms {
    /// Counts the unigram tokens of `text`.
    fn count(id: DocId, text: &str, tokenizer: &Tokenizer<'_>) -> Self {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        let mut total = 0;

        for token in tokenizer.unigrams(text) {
            *counts.entry(token.term).or_insert(0) += 1;
            total += 1;
        }

        Self { id, counts, total }
    }
}

/// Term counts for every document of a corpus.
#[derive(Debug, Clone)]
pub struct TermIndex {
    /// Per-document counts in corpus order.
    documents: Vec<DocumentTerms>,
}

impl TermIndex {
    /// Tokenizes and counts every document of `corpus`.
    pub fn build(corpus: &Corpus, tokenizer: &Tokenizer<'_>) -> Result<Self, AnalysisError> {
        if corpus.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        let documents: Vec<DocumentTerms> = corpus
            .documents()
            .par_iter()
            .map(|doc| DocumentTerms::count(doc.id.clone(), &doc.text, tokenizer))
            .collect();

        let index = Self { documents };
        debug!(
            documents = index.documents.len(),
            vocabulary = index.vocabulary().len(),
            tokens = index.total_tokens(),
            "built term index"
        );
        Ok(index)
    }

    /// Returns per-document counts in corpus order.
    pub fn documents(&self) -> &[DocumentTerms] {
        &self.documents
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the surviving tokens across the corpus.
    pub fn total_tokens(&self) -> u64 {
        self.documents.iter().map(|d| u64::from(d.total)).sum()
    }

    /// Returns the sorted corpus vocabulary.
    pub fn vocabulary(&self) -> Vec<&str> {
        self.document_frequencies().into_keys().collect()
    }

    /// Returns the number of documents each term occurs in.
    pub fn document_frequencies(&self) -> BTreeMap<&str, usize> {
        let mut frequencies: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &self.documents {
            for term in doc.counts.keys() {
                *frequencies.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        frequencies
    }

    /// Returns one row per (document, term) pair, in document then term order.
    pub fn term_counts(&self) -> Vec<TermCount> {
        self.documents
            .iter()
            .flat_map(|doc| {
                doc.counts.iter().map(|(term, &count)| TermCount {
                    document: doc.id.clone(),
                    term: term.clone(),
                    count,
                })
            })
            .collect()
    }

    /// Builds the document-term matrix.
    pub fn matrix(&self) -> DocumentTermMatrix {
        let vocabulary: Vec<String> = self
            .vocabulary()
            .into_iter()
            .map(str::to_string)
            .collect();
        let positions: BTreeMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let rows = self
            .documents
            .iter()
            .map(|doc| {
                doc.counts
                    .iter()
                    .map(|(term, &count)| (positions[term.as_str()], count))
                    .collect()
            })
            .collect();

        DocumentTermMatrix {
            documents: self.documents.iter().map(|d| d.id.clone()).collect(),
            vocabulary,
            rows,
        }
    }
}

/// Sparse document-term matrix over the sorted corpus vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTermMatrix {
    /// Row labels in corpus order.
    documents: Vec<DocId>,
    /// Column labels, sorted.
    vocabulary: Vec<String>,
    /// Non-zero `(column, count)` entries per row, in column order.
    rows: Vec<Vec<(usize, u32)>>,
}

impl DocumentTermMatrix {
    /// Returns the row labels.
    pub fn documents(&self) -> &[DocId] {
        &self.documents
    }

    /// Returns the column labels.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns the number of rows.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Returns the number of columns.
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Returns the non-zero entries of row `document`.
    pub fn row(&self, document: usize) -> &[(usize, u32)] {
        &self.rows[document]
    }

    /// Returns the count at `(document, term)`.
    pub fn get(&self, document: usize, term: usize) -> u32 {
        self.rows[document]
            .binary_search_by_key(&term, |&(column, _)| column)
            .map_or(0, |i| self.rows[document][i].1)
    }

    /// Returns the sum of all counts.
    pub fn total_tokens(&self) -> u64 {
        self.rows
            .iter()
            .flatten()
            .map(|&(_, count)| u64::from(count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stopwords;

    /// Builds an index over `pairs` with `stopwords`.
    fn index(pairs: &[(&str, &str)], stopwords: &[&str]) -> TermIndex {
        let corpus = Corpus::from_pairs(pairs.iter().copied()).unwrap();
        let stopwords = Stopwords::from_words(stopwords);
        TermIndex::build(&corpus, &Tokenizer::new(&stopwords)).unwrap()
    }

    #[test]
    fn counts_sum_to_surviving_tokens() {
        let index = index(
            &[("a.txt", "saúde saúde educação de 2020 xx"), ("b.txt", "moradia")],
            &["de"],
        );

        let doc = &index.documents()[0];
        assert_eq!(doc.total, 3);
        assert_eq!(doc.counts.values().sum::<u32>(), doc.total);
        assert_eq!(doc.counts["saúde"], 2);
        assert_eq!(index.total_tokens(), 4);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let corpus = Corpus::default();
        let stopwords = Stopwords::default();
        let err = TermIndex::build(&corpus, &Tokenizer::new(&stopwords)).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyCorpus));
    }

    #[test]
    fn document_without_tokens_keeps_its_row() {
        let index = index(&[("a.txt", "de da do"), ("b.txt", "moradia")], &["de", "da", "do"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.documents()[0].total, 0);
        assert!(index.matrix().row(0).is_empty());
    }

    #[test]
    fn term_counts_are_ordered_by_document_then_term() {
        let index = index(&[("b.txt", "zeta alfa"), ("a.txt", "beta")], &[]);
        let rows: Vec<(String, String)> = index
            .term_counts()
            .into_iter()
            .map(|r| (r.document.to_string(), r.term))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("a.txt".into(), "beta".into()),
                ("b.txt".into(), "alfa".into()),
                ("b.txt".into(), "zeta".into()),
            ]
        );
    }

    #[test]
    fn document_frequencies_count_documents_not_occurrences() {
        let index = index(&[("a.txt", "lei lei lei"), ("b.txt", "lei decreto")], &[]);
        let df = index.document_frequencies();
        assert_eq!(df["lei"], 2);
        assert_eq!(df["decreto"], 1);
    }

    #[test]
    fn matrix_uses_sorted_vocabulary() {
        let index = index(&[("a.txt", "zeta alfa alfa"), ("b.txt", "meio")], &[]);
        let matrix = index.matrix();

        assert_eq!(matrix.vocabulary(), ["alfa", "meio", "zeta"]);
        assert_eq!(matrix.document_count(), 2);
        assert_eq!(matrix.get(0, 0), 2);
        assert_eq!(matrix.get(0, 1), 0);
        assert_eq!(matrix.get(1, 1), 1);
        assert_eq!(matrix.total_tokens(), 4);
    }
}
