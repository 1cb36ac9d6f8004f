//! discourse: analytics over official document corpora
//!
//! Reads a directory of flattened plain-text documents and reports what they talk about and
//! how they talk about it: distinctive terms per document, latent topics, the balance between
//! rhetorical frames, and the word pairs that keep appearing together.

#![warn(missing_docs)]

pub mod cli;
