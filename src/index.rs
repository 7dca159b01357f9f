//! Builds the post index: every document in a [`DocumentStore`] parsed into
//! a [`PostSummary`], drafts filtered out, newest first.

use std::fmt;

use rayon::prelude::*;

use crate::frontmatter;
use crate::post::PostSummary;
use crate::read_time;
use crate::store::{self, DocumentStore};

/// Parses every post in `store` and returns the summaries sorted by date
/// (most recent first). Drafts are left out unless `include_drafts` is set.
///
/// A document that can't be read or parsed doesn't fail the whole index; it
/// is logged and skipped. Documents are loaded in parallel, and because the
/// sort is stable, posts with the same date keep the order of
/// [`DocumentStore::ids`].
pub fn build_index<S: DocumentStore + ?Sized>(
    store: &S,
    include_drafts: bool,
) -> store::Result<Vec<PostSummary>> {
    let ids = store.ids()?;

    let mut posts: Vec<PostSummary> = ids
        .par_iter()
        .filter_map(|id| match summarize(store, id) {
            Ok(post) => Some(post),
            Err(err) => {
                tracing::warn!(%id, %err, "skipping post");
                None
            }
        })
        .collect();

    if !include_drafts {
        posts.retain(|p| !p.meta.draft);
    }

    posts.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
    tracing::debug!(count = posts.len(), include_drafts, "built post index");
    Ok(posts)
}

/// Loads and parses a single post into a [`PostSummary`].
pub fn summarize<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<PostSummary> {
    let raw = store.read(id)?;
    let (meta, body) = frontmatter::parse(&raw)?;
    Ok(PostSummary {
        slug: id.to_owned(),
        read_time: read_time::estimate(body),
        meta,
    })
}

/// Returns the post with the given slug, if it's in `posts`.
pub fn find<'a>(posts: &'a [PostSummary], slug: &str) -> Option<&'a PostSummary> {
    posts.iter().find(|p| p.slug == slug)
}

/// Represents the result of loading a single post.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a single post for the index.
#[derive(Debug)]
pub enum Error {
    /// Returned when the document couldn't be read.
    Store(store::Error),

    /// Returned when the document's front-matter couldn't be parsed.
    Frontmatter(frontmatter::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Store(err) => err.fmt(f),
            Error::Frontmatter(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Frontmatter(err) => Some(err),
        }
    }
}

impl From<store::Error> for Error {
    fn from(err: store::Error) -> Error {
        Error::Store(err)
    }
}

impl From<frontmatter::Error> for Error {
    fn from(err: frontmatter::Error) -> Error {
        Error::Frontmatter(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::Memory;

    fn post(title: &str, date: &str, extra: &str) -> String {
        format!("---\ntitle: \"{}\"\ndate: \"{}\"\n{}---\nContent", title, date, extra)
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_sorted_newest_first() -> store::Result<()> {
        let store = Memory::new()
            .with("old", post("Old", "2024-01-15", ""))
            .with("new", post("New", "2025-03-01", ""))
            .with("mid", post("Mid", "2024-11-30", ""));

        let posts = build_index(&store, false)?;
        assert_eq!(slugs(&posts), vec!["new", "mid", "old"]);
        for pair in posts.windows(2) {
            assert!(pair[0].meta.date >= pair[1].meta.date);
        }
        Ok(())
    }

    #[test]
    fn test_equal_dates_are_stable() -> store::Result<()> {
        let store = Memory::new()
            .with("c", post("C", "2025-01-01", ""))
            .with("a", post("A", "2025-01-01", ""))
            .with("b", post("B", "2025-01-01", ""));

        let first = build_index(&store, false)?;
        let second = build_index(&store, false)?;
        assert_eq!(slugs(&first), vec!["a", "b", "c"]);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_drafts_filtered_by_default() -> store::Result<()> {
        let store = Memory::new()
            .with("published", post("Published", "2025-01-01", ""))
            .with("draft", post("Draft", "2025-01-02", "draft: true\n"));

        assert_eq!(slugs(&build_index(&store, false)?), vec!["published"]);
        assert_eq!(slugs(&build_index(&store, true)?), vec!["draft", "published"]);
        Ok(())
    }

    #[test]
    fn test_summary_fields() -> store::Result<()> {
        let store = Memory::new().with(
            "tagged",
            post("Tagged", "2025-01-01", "tags: [\"react\", \"typescript\"]\n"),
        );

        let posts = build_index(&store, false)?;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "tagged");
        assert_eq!(posts[0].meta.title, "Tagged");
        assert_eq!(posts[0].meta.tags, vec!["react", "typescript"]);
        assert_eq!(posts[0].read_time, 1);
        Ok(())
    }

    #[test]
    fn test_read_time_ignores_frontmatter() -> store::Result<()> {
        let body = vec!["word"; 450].join(" ");
        let store = Memory::new().with(
            "long",
            format!("---\ntitle: Long\ndate: 2025-01-01\n---\n{}", body),
        );

        assert_eq!(build_index(&store, false)?[0].read_time, 3);
        Ok(())
    }

    #[test]
    fn test_malformed_post_is_skipped() -> store::Result<()> {
        let store = Memory::new()
            .with("good", post("Good", "2025-01-01", ""))
            .with("unclosed", "---\ntitle: Oops\n")
            .with("bad-yaml", "---\ntitle: [oops\n---\nbody");

        assert_eq!(slugs(&build_index(&store, false)?), vec!["good"]);
        Ok(())
    }

    #[test]
    fn test_empty_store() -> store::Result<()> {
        assert!(build_index(&Memory::new(), true)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_find() -> store::Result<()> {
        let store = Memory::new().with("a", post("A", "2025-01-01", ""));
        let posts = build_index(&store, false)?;
        assert_eq!(find(&posts, "a").map(|p| p.meta.title.as_str()), Some("A"));
        assert!(find(&posts, "b").is_none());
        Ok(())
    }
}
