//! Lexicon-based framing classification.
//!
//! Each category is a list of substrings. A token belongs to the first
//! category, in priority order, having an entry contained in the token.
//! Tokens matching no category are counted as unclassified and never enter
//! the category totals, so totals are disjoint.

use std::collections::HashSet;

use discourse_config::FramingCategory;
use discourse_corpus::{Corpus, DocId};
use rayon::prelude::*;
use serde::Serialize;

use crate::{AnalysisError, ConfigurationError, Stopwords, Tokenizer};

/// One compiled category.
#[derive(Debug, Clone)]
struct Lexicon {
    /// Category label.
    name: String,
    /// Lowercased substrings.
    entries: Vec<String>,
}

/// Assigns tokens to framing categories.
#[derive(Debug, Clone)]
pub struct FramingClassifier {
    /// Categories in priority order.
    lexicons: Vec<Lexicon>,
}

impl FramingClassifier {
    /// Compiles the configured categories.
    ///
    /// Empty names, duplicate names, empty lexicons and empty entries are
    /// always rejected. With `require_disjoint`, entries of different
    /// categories must not contain one another.
    pub fn new(
        categories: &[FramingCategory],
        require_disjoint: bool,
    ) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        let mut lexicons = Vec::with_capacity(categories.len());

        for category in categories {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(ConfigurationError::EmptyCategoryName);
            }
            if !seen.insert(name.to_string()) {
                return Err(ConfigurationError::DuplicateCategory {
                    name: name.to_string(),
                });
            }
            if category.terms.is_empty() {
                return Err(ConfigurationError::EmptyLexicon {
                    name: name.to_string(),
                });
            }

            let entries: Vec<String> = category
                .terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .collect();
            if entries.iter().any(String::is_empty) {
                return Err(ConfigurationError::EmptyEntry {
                    name: name.to_string(),
                });
            }

            lexicons.push(Lexicon {
                name: name.to_string(),
                entries,
            });
        }

        if require_disjoint {
            check_disjoint(&lexicons)?;
        }

        Ok(Self { lexicons })
    }

    /// Returns category names in priority order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.lexicons.iter().map(|l| l.name.as_str())
    }

    /// Returns the index of the first category matching `token`.
    pub fn classify(&self, token: &str) -> Option<usize> {
        self.lexicons.iter().position(|lexicon| {
            lexicon
                .entries
                .iter()
                .any(|entry| token.contains(entry.as_str()))
        })
    }

    /// Rejects entries that the tokenizer would drop as stopwords.
    pub fn check_stopwords(&self, stopwords: &Stopwords) -> Result<(), ConfigurationError> {
        for lexicon in &self.lexicons {
            if let Some(entry) = lexicon.entries.iter().find(|e| stopwords.contains(e)) {
                return Err(ConfigurationError::StopwordEntry {
                    category: lexicon.name.clone(),
                    entry: entry.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns the name of the first category matching `token`.
    pub fn label(&self, token: &str) -> Option<&str> {
        self.classify(token)
            .map(|index| self.lexicons[index].name.as_str())
    }

    /// Tallies a token stream.
    pub fn tally<I, S>(&self, tokens: I) -> FrameTally
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = FrameTally {
            counts: vec![0; self.lexicons.len()],
            unclassified: 0,
        };
        for token in tokens {
            match self.classify(token.as_ref()) {
                Some(index) => tally.counts[index] += 1,
                None => tally.unclassified += 1,
            }
        }
        tally
    }

    /// Classifies the unigram tokens of every document in `corpus`.
    pub fn aggregate(
        &self,
        corpus: &Corpus,
        tokenizer: &Tokenizer<'_>,
    ) -> Result<FramingReport, AnalysisError> {
        if corpus.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        let tallies: Vec<(DocId, FrameTally)> = corpus
            .documents()
            .par_iter()
            .map(|doc| {
                let tally = self.tally(tokenizer.unigrams(&doc.text).map(|t| t.term));
                (doc.id.clone(), tally)
            })
            .collect();

        Ok(self.report(tallies))
    }

    /// Combines per-document tallies into a report.
    fn report(&self, tallies: Vec<(DocId, FrameTally)>) -> FramingReport {
        let mut totals = vec![0_u64; self.lexicons.len()];
        let mut unclassified = 0;
        for (_, tally) in &tallies {
            for (total, count) in totals.iter_mut().zip(&tally.counts) {
                *total += count;
            }
            unclassified += tally.unclassified;
        }

        let names: Vec<String> = self.lexicons.iter().map(|l| l.name.clone()).collect();
        let documents = tallies
            .into_iter()
            .map(|(document, tally)| DocumentFraming {
                document,
                categories: names
                    .iter()
                    .cloned()
                    .zip(tally.counts)
                    .map(|(category, count)| CategoryCount { category, count })
                    .collect(),
                unclassified: tally.unclassified,
            })
            .collect();

        FramingReport {
            categories: names
                .into_iter()
                .zip(totals)
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            unclassified,
            documents,
        }
    }
}

/// Finds the first pair of entries from different categories where one contains the other.
fn check_disjoint(lexicons: &[Lexicon]) -> Result<(), ConfigurationError> {
    for (i, first) in lexicons.iter().enumerate() {
        for second in &lexicons[i + 1..] {
            for a in &first.entries {
                if let Some(b) = second
                    .entries
                    .iter()
                    .find(|b| a.contains(b.as_str()) || b.contains(a.as_str()))
                {
                    return Err(ConfigurationError::OverlappingLexicons {
                        first: first.name.clone(),
                        first_entry: a.clone(),
                        second: second.name.clone(),
                        second_entry: b.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Classification counts for one token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTally {
    /// Tokens per category, in priority order.
    pub counts: Vec<u64>,
    /// Tokens matching no category.
    pub unclassified: u64,
}

/// Token count of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name.
    pub category: String,
    /// Tokens labeled with the category.
    pub count: u64,
}

/// Framing counts of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFraming {
    /// Document id.
    pub document: DocId,
    /// Counts in priority order.
    pub categories: Vec<CategoryCount>,
    /// Tokens matching no category.
    pub unclassified: u64,
}

/// Corpus-wide framing counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FramingReport {
    /// Totals in priority order, every configured category present.
    pub categories: Vec<CategoryCount>,
    /// Tokens matching no category.
    pub unclassified: u64,
    /// Per-document breakdown in corpus order.
    pub documents: Vec<DocumentFraming>,
}

impl FramingReport {
    /// Returns the total of a category.
    pub fn count(&self, category: &str) -> Option<u64> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
    }

    /// Returns the tokens assigned to any category.
    pub fn classified(&self) -> u64 {
        self.categories.iter().map(|c| c.count).sum()
    }

    /// Returns `positive - negative`, for a divergent bar.
    pub fn balance(&self, positive: &str, negative: &str) -> Option<i64> {
        let positive = i64::try_from(self.count(positive)?).ok()?;
        let negative = i64::try_from(self.count(negative)?).ok()?;
        Some(positive - negative)
    }
}
