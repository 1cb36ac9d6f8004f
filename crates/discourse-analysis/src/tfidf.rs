//! TF-IDF term relevance.
//!
//! - `tf = count / total_terms_in_document`
//! - `idf = ln(N / df)`, where `N` is the corpus size and `df` the number of
//!   documents containing the term
//! - `tf_idf = tf * idf`
//!
//! A term present in every document scores exactly zero. Rankings order by
//! descending score, then descending raw count, then ascending term.

use std::cmp::Ordering;

use discourse_corpus::DocId;
use serde::Serialize;

use crate::TermIndex;

/// Relevance of one term in one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TfIdfScore {
    /// Document the term occurs in.
    pub document: DocId,
    /// Normalized term.
    pub term: String,
    /// Raw occurrences in the document.
    pub count: u32,
    /// Term frequency within the document.
    pub tf: f64,
    /// Inverse document frequency across the corpus.
    pub idf: f64,
    /// Product of `tf` and `idf`.
    pub tf_idf: f64,
}

/// Ranking order: score descending, count descending, term ascending.
fn rank(a: &TfIdfScore, b: &TfIdfScore) -> Ordering {
    b.tf_idf
        .total_cmp(&a.tf_idf)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| a.term.cmp(&b.term))
}

/// Ranked TF-IDF scores for every document.
#[derive(Debug, Clone)]
pub struct TfIdfTable {
    /// Scores per document in corpus order, each list ranked.
    documents: Vec<(DocId, Vec<TfIdfScore>)>,
}

impl TfIdfTable {
    /// Scores every (document, term) pair of `index`.
    pub fn compute(index: &TermIndex) -> Self {
        let corpus_size = index.len() as f64;
        let frequencies = index.document_frequencies();

        let documents = index
            .documents()
            .iter()
            .map(|doc| {
                let total = f64::from(doc.total);
                let mut scores: Vec<TfIdfScore> = doc
                    .counts
                    .iter()
                    .map(|(term, &count)| {
                        let df = frequencies[term.as_str()] as f64;
                        let tf = f64::from(count) / total;
                        let idf = (corpus_size / df).ln();
                        TfIdfScore {
                            document: doc.id.clone(),
                            term: term.clone(),
                            count,
                            tf,
                            idf,
                            tf_idf: tf * idf,
                        }
                    })
                    .collect();
                scores.sort_by(rank);
                (doc.id.clone(), scores)
            })
            .collect();

        Self { documents }
    }

    /// Returns the ranked scores of one document.
    pub fn document(&self, id: &DocId) -> Option<&[TfIdfScore]> {
        self.documents
            .iter()
            .find(|(doc, _)| doc == id)
            .map(|(_, scores)| scores.as_slice())
    }

    /// Returns the score of `term` in document `id`.
    pub fn get(&self, id: &DocId, term: &str) -> Option<&TfIdfScore> {
        self.document(id)?.iter().find(|s| s.term == term)
    }

    /// Returns every score, documents in corpus order and each document ranked.
    pub fn scores(&self) -> impl Iterator<Item = &TfIdfScore> {
        self.documents.iter().flat_map(|(_, scores)| scores)
    }

    /// Returns the top `n` terms of every document.
    ///
    /// Documents with fewer than `n` distinct terms contribute all of them.
    pub fn top_n(&self, n: usize) -> Vec<TfIdfScore> {
        self.documents
            .iter()
            .flat_map(|(_, scores)| scores.iter().take(n).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use discourse_corpus::Corpus;

    use super::*;
    use crate::{Stopwords, Tokenizer};

    /// Scores `pairs` with no stopwords.
    fn table(pairs: &[(&str, &str)]) -> TfIdfTable {
        let corpus = Corpus::from_pairs(pairs.iter().copied()).unwrap();
        let stopwords = Stopwords::default();
        let index = TermIndex::build(&corpus, &Tokenizer::new(&stopwords)).unwrap();
        TfIdfTable::compute(&index)
    }

    #[test]
    fn term_in_every_document_scores_zero() {
        let table = table(&[("a.txt", "governo saúde"), ("b.txt", "governo escola")]);
        let score = table.get(&DocId::from("a.txt"), "governo").unwrap();
        assert_eq!(score.idf, 0.0);
        assert_eq!(score.tf_idf, 0.0);
    }

    #[test]
    fn score_follows_formula() {
        let table = table(&[("a.txt", "saúde saúde governo"), ("b.txt", "governo")]);
        let score = table.get(&DocId::from("a.txt"), "saúde").unwrap();

        assert_eq!(score.count, 2);
        assert!((score.tf - 2.0 / 3.0).abs() < 1e-12);
        assert!((score.idf - 2.0_f64.ln()).abs() < 1e-12);
        assert!((score.tf_idf - 2.0 / 3.0 * 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn scores_are_never_negative() {
        let table = table(&[
            ("a.txt", "lei decreto portaria"),
            ("b.txt", "lei decreto"),
            ("c.txt", "lei"),
        ]);
        assert!(table.scores().all(|s| s.tf_idf >= 0.0));
    }

    #[test]
    fn ties_break_by_term() {
        let table = table(&[("a.txt", "zeta alfa"), ("b.txt", "outro")]);
        let terms: Vec<&str> = table
            .document(&DocId::from("a.txt"))
            .unwrap()
            .iter()
            .map(|s| s.term.as_str())
            .collect();
        assert_eq!(terms, vec!["alfa", "zeta"]);
    }

    #[test]
    fn equal_scores_rank_by_count() {
        // Both terms are in every document, so both score zero.
        let table = table(&[("a.txt", "beta alfa alfa"), ("b.txt", "alfa beta")]);
        let top = table.top_n(1);
        assert_eq!(top[0].term, "alfa");
    }

    #[test]
    fn top_n_takes_per_document() {
        let table = table(&[
            ("a.txt", "saúde educação moradia"),
            ("b.txt", "transporte"),
        ]);
        let top = table.top_n(2);

        assert_eq!(top.len(), 3);
        assert_eq!(top[2].document.as_str(), "b.txt");
        assert_eq!(top[2].term, "transporte");
    }

    #[test]
    fn single_document_scores_zero() {
        let table = table(&[("a.txt", "saúde educação")]);
        assert!(table.scores().all(|s| s.tf_idf == 0.0));
    }
}
