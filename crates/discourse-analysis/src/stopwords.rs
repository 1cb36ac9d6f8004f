//! Stopword filtering.
//!
//! The stopword set is the union of:
//! - A base-language list from the `stop-words` crate (NLTK lists)
//! - Domain-specific terms supplied by configuration
//!
//! All words are stored lowercased. The set is built once per run and is
//! immutable afterwards.

use std::{collections::HashSet, fmt, str::FromStr};

use stop_words::LANGUAGE;

use crate::ConfigurationError;

/// Base language of the stopword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwordLanguage {
    /// No base list; only domain terms are filtered.
    None,
    /// Dutch.
    Dutch,
    /// English.
    English,
    /// French.
    French,
    /// German.
    German,
    /// Italian.
    Italian,
    /// Portuguese.
    #[default]
    Portuguese,
    /// Spanish.
    Spanish,
}

impl StopwordLanguage {
    /// Returns the base list for this language.
    fn base_words(self) -> &'static [&'static str] {
        let language = match self {
            Self::None => return &[],
            Self::Dutch => LANGUAGE::Dutch,
            Self::English => LANGUAGE::English,
            Self::French => LANGUAGE::French,
            Self::German => LANGUAGE::German,
            Self::Italian => LANGUAGE::Italian,
            Self::Portuguese => LANGUAGE::Portuguese,
            Self::Spanish => LANGUAGE::Spanish,
        };
        stop_words::get(language)
    }

    /// Returns the configuration name of this language.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dutch => "dutch",
            Self::English => "english",
            Self::French => "french",
            Self::German => "german",
            Self::Italian => "italian",
            Self::Portuguese => "portuguese",
            Self::Spanish => "spanish",
        }
    }
}

impl FromStr for StopwordLanguage {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "dutch" | "nl" => Ok(Self::Dutch),
            "english" | "en" => Ok(Self::English),
            "french" | "fr" => Ok(Self::French),
            "german" | "de" => Ok(Self::German),
            "italian" | "it" => Ok(Self::Italian),
            "portuguese" | "pt" => Ok(Self::Portuguese),
            "spanish" | "es" => Ok(Self::Spanish),
            _ => Err(ConfigurationError::UnknownLanguage {
                language: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StopwordLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stopword filter combining a base language list and domain terms.
///
/// Uses a `HashSet` for O(1) lookup. Matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    /// Lowercased stopwords.
    words: HashSet<String>,
}

impl Stopwords {
    /// Creates a filter from a base language and extra domain terms.
    pub fn new<S: AsRef<str>>(language: StopwordLanguage, domain: &[S]) -> Self {
        let mut words = HashSet::new();

        for word in language.base_words() {
            words.insert(word.to_lowercase());
        }
        for word in domain {
            words.insert(word.as_ref().trim().to_lowercase());
        }
        words.remove("");

        Self { words }
    }

    /// Creates a filter holding exactly the given words.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self::new(StopwordLanguage::None, words)
    }

    /// Checks if a term is a stopword.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term) || self.words.contains(&term.to_lowercase())
    }

    /// Returns the total number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stopwords are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
