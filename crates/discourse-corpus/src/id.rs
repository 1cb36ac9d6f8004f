//! Document identifiers.
//!
//! A document id is the document's path relative to the corpus root, with
//! forward slashes on every platform. Ids order lexically, which fixes the
//! order every analysis stage visits documents in.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

/// Stable, unique identifier of a document within one run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Creates an id from an arbitrary label.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an id from a path relative to the corpus root.
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().replace('\\', "/"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn from_path_uses_forward_slashes() {
        let id = DocId::from_path(&PathBuf::from("2019").join("decreto.txt"));
        assert_eq!(id.as_str(), "2019/decreto.txt");
        assert_eq!(id.to_string(), "2019/decreto.txt");
    }

    #[test]
    fn ids_order_lexically() {
        let mut ids = vec![DocId::from("b.txt"), DocId::from("a/z.txt"), DocId::from("a.txt")];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(DocId::as_str).collect();
        assert_eq!(names, vec!["a.txt", "a/z.txt", "b.txt"]);
    }
}
