//! Document sources.
//!
//! A [`DocumentSource`] yields the whole corpus at once. The directory source
//! walks a corpus root, applies include/exclude patterns, and reads every
//! matching file as UTF-8. Any walk or read failure aborts the load.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use discourse_config::CorpusSettings;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::{Corpus, CorpusError, DocId, Document};

/// Something that can produce a complete corpus.
pub trait DocumentSource {
    /// Loads every document, or fails without returning a partial corpus.
    fn load(&self) -> Result<Corpus, CorpusError>;
}

/// Loads documents from a directory tree.
#[derive(Debug)]
pub struct DirectorySource {
    /// Corpus root directory.
    root: PathBuf,
    /// Compiled include patterns.
    include: GlobSet,
    /// Compiled exclude patterns.
    exclude: GlobSet,
    /// Upper bound on the number of documents.
    max_documents: Option<usize>,
}

impl DirectorySource {
    /// Creates a source for `root` with the given include/exclude patterns.
    pub fn new(
        root: impl Into<PathBuf>,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self, CorpusError> {
        Ok(Self {
            root: root.into(),
            include: compile_globs(include)?,
            exclude: compile_globs(exclude)?,
            max_documents: None,
        })
    }

    /// Creates a source from configured corpus settings.
    pub fn from_settings(settings: &CorpusSettings) -> Result<Self, CorpusError> {
        let root = settings.path.clone().ok_or(CorpusError::NoCorpusPath)?;
        let mut source = Self::new(root, &settings.include, &settings.exclude)?;
        source.max_documents = settings.max_documents;
        Ok(source)
    }

    /// Bounds the number of documents a load may return.
    pub fn with_max_documents(mut self, limit: usize) -> Self {
        self.max_documents = Some(limit);
        self
    }

    /// Returns the corpus root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists matching files as `(relative, absolute)` paths.
    fn discover(&self) -> Result<Vec<(PathBuf, PathBuf)>, CorpusError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        {
            let entry = entry.map_err(|source| CorpusError::Walk {
                path: source
                    .path()
                    .map_or_else(|| self.root.clone(), Path::to_path_buf),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let abs_path = entry.path().to_path_buf();
            let Ok(rel_path) = abs_path.strip_prefix(&self.root) else {
                continue;
            };

            if self.include.is_match(rel_path) && !self.exclude.is_match(rel_path) {
                files.push((rel_path.to_path_buf(), abs_path.clone()));
            }
        }

        Ok(files)
    }
}

impl DocumentSource for DirectorySource {
    fn load(&self) -> Result<Corpus, CorpusError> {
        if !self.root.is_dir() {
            return Err(CorpusError::RootNotFound {
                path: self.root.clone(),
            });
        }

        let files = self.discover()?;

        if let Some(limit) = self.max_documents
            && files.len() > limit
        {
            return Err(CorpusError::TooManyDocuments {
                found: files.len(),
                limit,
            });
        }

        let documents = files
            .iter()
            .map(|(rel, abs)| {
                Ok(Document {
                    id: DocId::from_path(rel),
                    text: read_text(abs)?,
                })
            })
            .collect::<Result<Vec<_>, CorpusError>>()?;

        debug!(
            root = %self.root.display(),
            documents = documents.len(),
            "loaded corpus"
        );

        Corpus::new(documents)
    }
}

/// Reads a file as UTF-8 text.
fn read_text(path: &Path) -> Result<String, CorpusError> {
    let bytes = fs::read(path).map_err(|source| CorpusError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| CorpusError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Compiles a list of glob patterns into a set.
fn compile_globs(patterns: &[String]) -> Result<GlobSet, CorpusError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| CorpusError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| CorpusError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
