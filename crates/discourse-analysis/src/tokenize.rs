//! Tokenization and normalization.
//!
//! Raw text is split on every non-alphanumeric character and each word is
//! lowercased. This normalized word stream feeds two modes:
//! - Unigrams: words that survive the stopword, digit and length filters
//! - N-grams: adjacent windows over the unfiltered stream
//!
//! Both are lazy iterators over one document. They are `Clone`, so a fresh
//! clone of an unconsumed iterator restarts the sequence.

use std::{collections::VecDeque, iter::Enumerate, str::Split};

use crate::Stopwords;

/// Words of two characters or fewer are dropped from the unigram stream.
const MIN_TOKEN_CHARS: usize = 3;

/// Default window size for n-grams.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// A normalized unigram and its position in the raw word stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased term.
    pub term: String,
    /// Zero-based index of the word in the unfiltered stream.
    pub position: usize,
}

/// Adjacent normalized words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGram {
    /// Words in text order.
    pub terms: Vec<String>,
    /// Position of the first word in the unfiltered stream.
    pub position: usize,
}

/// Converts raw text into token streams.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    /// Terms removed from the unigram stream.
    stopwords: &'a Stopwords,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer that filters with `stopwords`.
    pub fn new(stopwords: &'a Stopwords) -> Self {
        Self { stopwords }
    }

    /// Returns the stopword set in use.
    pub fn stopwords(&self) -> &'a Stopwords {
        self.stopwords
    }

    /// Returns true if a normalized word passes the unigram filters.
    pub fn is_content_word(&self, word: &str) -> bool {
        !self.stopwords.contains(word)
            && !word.chars().any(char::is_numeric)
            && word.chars().count() >= MIN_TOKEN_CHARS
    }

    /// Iterates the filtered unigram tokens of `text`.
    pub fn unigrams<'t>(&self, text: &'t str) -> Unigrams<'a, 't> {
        Unigrams {
            words: words(text).enumerate(),
            tokenizer: *self,
        }
    }

    /// Iterates windows of `n` adjacent words over the unfiltered stream.
    ///
    /// A window size of zero yields nothing.
    pub fn ngrams<'t>(&self, text: &'t str, n: usize) -> NGrams<'t> {
        NGrams {
            words: words(text),
            window: VecDeque::with_capacity(n),
            size: n,
            next_position: 0,
        }
    }

    /// Iterates adjacent word pairs over the unfiltered stream.
    pub fn bigrams<'t>(&self, text: &'t str) -> NGrams<'t> {
        self.ngrams(text, DEFAULT_NGRAM_SIZE)
    }
}

/// Splits `text` into lowercased words, keeping stopwords, numbers and short words.
pub fn words(text: &str) -> Words<'_> {
    Words {
        parts: text.split(is_separator as fn(char) -> bool),
    }
}

/// Returns true for characters that separate words.
fn is_separator(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Unfiltered normalized word stream.
#[derive(Debug, Clone)]
pub struct Words<'t> {
    /// Raw pieces between separators, possibly empty.
    parts: Split<'t, fn(char) -> bool>,
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.parts
            .by_ref()
            .find(|part| !part.is_empty())
            .map(str::to_lowercase)
    }
}

/// Filtered unigram stream of one document.
#[derive(Debug, Clone)]
pub struct Unigrams<'a, 't> {
    /// Positioned unfiltered words.
    words: Enumerate<Words<'t>>,
    /// Filter configuration.
    tokenizer: Tokenizer<'a>,
}

impl Iterator for Unigrams<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let tokenizer = self.tokenizer;
        self.words
            .by_ref()
            .find(|(_, word)| tokenizer.is_content_word(word))
            .map(|(position, term)| Token { term, position })
    }
}

/// Sliding window of adjacent words over one document.
#[derive(Debug, Clone)]
pub struct NGrams<'t> {
    /// Unfiltered words.
    words: Words<'t>,
    /// The most recent words, at most `size` of them.
    window: VecDeque<String>,
    /// Window size.
    size: usize,
    /// Position of the next word pulled from `words`.
    next_position: usize,
}

impl Iterator for NGrams<'_> {
    type Item = NGram;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }

        loop {
            let word = self.words.next()?;
            self.next_position += 1;

            if self.window.len() == self.size {
                self.window.pop_front();
            }
            self.window.push_back(word);

            if self.window.len() == self.size {
                return Some(NGram {
                    terms: self.window.iter().cloned().collect(),
                    position: self.next_position - self.size,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects the unigram terms of `text`.
    fn terms(tokenizer: &Tokenizer<'_>, text: &str) -> Vec<String> {
        tokenizer.unigrams(text).map(|t| t.term).collect()
    }

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        let words: Vec<String> = words("Política, Pública; (saúde)!").collect();
        assert_eq!(words, vec!["política", "pública", "saúde"]);
    }

    #[test]
    fn unigrams_drop_stopwords_digits_and_short_words() {
        let stopwords = Stopwords::from_words(&["para"]);
        let tokenizer = Tokenizer::new(&stopwords);

        let result = terms(&tokenizer, "Recursos para 2019 os a3b programa ação");
        assert_eq!(result, vec!["recursos", "programa", "ação"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let stopwords = Stopwords::default();
        let tokenizer = Tokenizer::new(&stopwords);

        // "ão" is two characters but four bytes.
        assert_eq!(terms(&tokenizer, "ão não"), vec!["não"]);
    }

    #[test]
    fn unigram_positions_index_the_raw_stream() {
        let stopwords = Stopwords::from_words(&["de"]);
        let tokenizer = Tokenizer::new(&stopwords);

        let tokens: Vec<Token> = tokenizer.unigrams("plano de ação").collect();
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].term, "ação");
        assert_eq!(tokens[1].position, 2);
    }

    #[test]
    fn empty_text_yields_nothing() {
        let stopwords = Stopwords::default();
        let tokenizer = Tokenizer::new(&stopwords);

        assert_eq!(tokenizer.unigrams("").count(), 0);
        assert_eq!(tokenizer.bigrams("").count(), 0);
        assert_eq!(tokenizer.unigrams(" ,;. ").count(), 0);
    }

    #[test]
    fn bigrams_use_the_unfiltered_stream() {
        let stopwords = Stopwords::from_words(&["de"]);
        let tokenizer = Tokenizer::new(&stopwords);

        let grams: Vec<NGram> = tokenizer.bigrams("Plano de ação").collect();
        assert_eq!(grams.len(), 2);
        assert_eq!(grams[0].terms, vec!["plano", "de"]);
        assert_eq!(grams[0].position, 0);
        assert_eq!(grams[1].terms, vec!["de", "ação"]);
        assert_eq!(grams[1].position, 1);
    }

    #[test]
    fn trigrams_slide_one_word_at_a_time() {
        let stopwords = Stopwords::default();
        let tokenizer = Tokenizer::new(&stopwords);

        let grams: Vec<Vec<String>> = tokenizer
            .ngrams("um dois tres quatro", 3)
            .map(|g| g.terms)
            .collect();
        assert_eq!(
            grams,
            vec![vec!["um", "dois", "tres"], vec!["dois", "tres", "quatro"]]
        );
    }

    #[test]
    fn short_text_yields_no_window() {
        let stopwords = Stopwords::default();
        let tokenizer = Tokenizer::new(&stopwords);

        assert_eq!(tokenizer.bigrams("sozinho").count(), 0);
        assert_eq!(tokenizer.ngrams("um dois", 0).count(), 0);
    }

    #[test]
    fn cloned_iterator_restarts() {
        let stopwords = Stopwords::default();
        let tokenizer = Tokenizer::new(&stopwords);

        let unigrams = tokenizer.unigrams("saúde educação moradia");
        let first: Vec<Token> = unigrams.clone().collect();
        let second: Vec<Token> = unigrams.collect();
        assert_eq!(first, second);

        let bigrams = tokenizer.bigrams("saúde educação moradia");
        assert_eq!(bigrams.clone().count(), bigrams.count());
    }
}
