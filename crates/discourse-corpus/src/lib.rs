//! Document ingestion for discourse.
//!
//! This crate turns a directory of plain-text documents into an immutable
//! [`Corpus`]. It supports:
//! - Include/exclude glob patterns relative to the corpus root
//! - Stable document ids derived from relative paths
//! - A bound on corpus size so downstream fitting time stays predictable
//!
//! Text extraction from binary formats (PDF, office documents) happens before
//! this crate; documents arrive here already flattened to one UTF-8 file each.

#![warn(missing_docs)]

mod error;
mod id;
mod source;

pub use error::CorpusError;
pub use id::DocId;
pub use source::{DirectorySource, DocumentSource};

/// A document as delivered by the ingestion step.
///
/// Immutable once loaded; lives for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Unique, stable identifier.
    pub id: DocId,
    /// Raw text, multi-page content already flattened to one string.
    pub text: String,
}

impl Document {
    /// Creates a document.
    pub fn new(id: impl Into<DocId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// The full, ordered set of documents analyzed in one run.
///
/// Documents are kept sorted by id and ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Documents sorted by id.
    documents: Vec<Document>,
}

impl Corpus {
    /// Builds a corpus, sorting documents by id.
    ///
    /// Fails if two documents share an id.
    pub fn new(mut documents: Vec<Document>) -> Result<Self, CorpusError> {
        documents.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = documents.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(CorpusError::DuplicateId {
                id: pair[0].id.clone(),
            });
        }

        Ok(Self { documents })
    }

    /// Builds a corpus from `(id, text)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<DocId>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, text)| Document::new(id, text))
                .collect(),
        )
    }

    /// Returns the documents in id order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Looks up a document by id.
    pub fn get(&self, id: &DocId) -> Option<&Document> {
        self.documents
            .binary_search_by(|d| d.id.cmp(id))
            .ok()
            .map(|i| &self.documents[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_sorts_by_id() {
        let corpus = Corpus::from_pairs([("b.txt", "dois"), ("a.txt", "um")]).unwrap();
        let ids: Vec<&str> = corpus.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt", "b.txt"]);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn corpus_rejects_duplicate_ids() {
        let err = Corpus::from_pairs([("a.txt", "um"), ("a.txt", "outro")]).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateId { .. }));
    }

    #[test]
    fn empty_corpus_is_a_valid_value() {
        let corpus = Corpus::new(Vec::new()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn get_finds_document() {
        let corpus = Corpus::from_pairs([("a.txt", "um"), ("b.txt", "dois")]).unwrap();
        let doc = corpus.get(&DocId::from("b.txt")).unwrap();
        assert_eq!(doc.text, "dois");
        assert!(corpus.get(&DocId::from("c.txt")).is_none());
    }
}
