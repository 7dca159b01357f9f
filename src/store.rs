//! Defines the [`DocumentStore`] trait, which is how the rest of the crate
//! gets at post source text, plus the two stores we ship: [`Directory`], which
//! reads posts from a directory on disk, and [`Memory`], which holds posts in
//! a map (handy for tests and for embedding `folio` in another program).

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// The file extensions recognized as post sources.
const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A read-only source of raw post documents keyed by identifier. The
/// identifier doubles as the post slug.
pub trait DocumentStore: Sync {
    /// Lists every document identifier in the store, in a stable order.
    fn ids(&self) -> Result<Vec<String>>;

    /// Returns the raw text (front-matter and body) for `id`. Fails with
    /// [`Error::NotFound`] if there is no such document.
    fn read(&self, id: &str) -> Result<String>;
}

/// Reads posts from a directory. The identifier for a post is its path
/// relative to the root less the extension (e.g., the ID for
/// `{root}/notes/hello.md` is `notes/hello`). Directory bundles whose post
/// lives at `{root}/hello/index.md` get the ID `hello`.
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new<P: Into<PathBuf>>(root: P) -> Directory {
        Directory { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn id_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let extension = relative.extension()?.to_str()?;
        if !POST_EXTENSIONS.contains(&extension) {
            return None;
        }

        let stem = relative.with_extension("");
        let stem = if stem.file_name()? == "index" {
            stem.parent()?.to_owned()
        } else {
            stem
        };

        let components = stem
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<&str>>>()?;
        if components.is_empty() {
            return None;
        }
        Some(components.join("/"))
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        // Identifiers never climb out of the root.
        if id.is_empty() || id.split('/').any(|part| part == ".." || part.is_empty()) {
            return None;
        }

        POST_EXTENSIONS
            .iter()
            .flat_map(|ext| {
                vec![
                    self.root.join(format!("{}.{}", id, ext)),
                    self.root.join(id).join(format!("index.{}", ext)),
                ]
            })
            .find(|candidate| candidate.is_file())
    }
}

impl DocumentStore for Directory {
    fn ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for result in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = result?;
            if entry.file_type().is_file() {
                if let Some(id) = self.id_for(entry.path()) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String> {
        use std::io::Read;

        let path = self
            .path_for(id)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        let mut contents = String::new();
        File::open(&path)
            .and_then(|mut f| f.read_to_string(&mut contents))
            .map_err(|err| Error::Io { path, err })?;
        Ok(contents)
    }
}

/// An in-memory store. Identifiers are listed in sorted order.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    documents: BTreeMap<String, String>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Adds (or replaces) a document.
    pub fn insert<I: Into<String>, T: Into<String>>(&mut self, id: I, raw: T) {
        self.documents.insert(id.into(), raw.into());
    }

    /// Builder-style variant of [`Memory::insert`].
    pub fn with<I: Into<String>, T: Into<String>>(mut self, id: I, raw: T) -> Memory {
        self.insert(id, raw);
        self
    }
}

impl DocumentStore for Memory {
    fn ids(&self) -> Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<String> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }
}

/// Represents the result of a store operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading from a [`DocumentStore`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when no document exists for the identifier.
    #[error("no document with id `{0}`")]
    NotFound(String),

    /// Returned for I/O errors reading a document.
    #[error("reading `{}`: {err}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned for errors walking the posts directory.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),
}
