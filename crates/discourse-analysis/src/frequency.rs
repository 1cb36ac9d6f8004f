//! Corpus-wide term frequencies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::TermIndex;

/// Total occurrences of a term across the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermFrequency {
    /// Normalized term.
    pub term: String,
    /// Occurrences across all documents.
    pub count: u64,
}

/// Ranked corpus-wide term frequencies.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    /// Terms by descending count, then ascending term.
    ranked: Vec<TermFrequency>,
}

impl TermFrequencies {
    /// Sums per-document counts of `index`.
    pub fn from_index(index: &TermIndex) -> Self {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for doc in index.documents() {
            for (term, &count) in &doc.counts {
                *totals.entry(term.as_str()).or_insert(0) += u64::from(count);
            }
        }

        let mut ranked: Vec<TermFrequency> = totals
            .into_iter()
            .map(|(term, count)| TermFrequency {
                term: term.to_string(),
                count,
            })
            .collect();
        // Stable sort keeps term order among equal counts.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));

        Self { ranked }
    }

    /// Returns all terms, ranked.
    pub fn all(&self) -> &[TermFrequency] {
        &self.ranked
    }

    /// Returns the `n` most frequent terms.
    pub fn top(&self, n: usize) -> &[TermFrequency] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    /// Returns the count of `term`, zero if absent.
    pub fn count(&self, term: &str) -> u64 {
        self.ranked
            .iter()
            .find(|f| f.term == term)
            .map_or(0, |f| f.count)
    }
}

#[cfg(test)]
mod tests {
    use discourse_corpus::Corpus;

    use super::*;
    use crate::{Stopwords, Tokenizer};

    /// Frequencies of `pairs` with no stopwords.
    fn frequencies(pairs: &[(&str, &str)]) -> TermFrequencies {
        let corpus = Corpus::from_pairs(pairs.iter().copied()).unwrap();
        let stopwords = Stopwords::default();
        let index = TermIndex::build(&corpus, &Tokenizer::new(&stopwords)).unwrap();
        TermFrequencies::from_index(&index)
    }

    #[test]
    fn sums_across_documents() {
        let freq = frequencies(&[("a.txt", "saúde saúde escola"), ("b.txt", "saúde")]);
        assert_eq!(freq.count("saúde"), 3);
        assert_eq!(freq.count("escola"), 1);
        assert_eq!(freq.count("moradia"), 0);
    }

    #[test]
    fn ranks_by_count_then_term() {
        let freq = frequencies(&[("a.txt", "zeta alfa beta beta")]);
        let terms: Vec<&str> = freq.all().iter().map(|f| f.term.as_str()).collect();
        assert_eq!(terms, vec!["beta", "alfa", "zeta"]);
    }

    #[test]
    fn top_is_bounded_by_vocabulary() {
        let freq = frequencies(&[("a.txt", "saúde escola")]);
        assert_eq!(freq.top(1).len(), 1);
        assert_eq!(freq.top(50).len(), 2);
    }
}
