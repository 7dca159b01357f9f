//! Defines the post types shared across the crate: [`PostMeta`] (the
//! front-matter of a post), [`PostSummary`] (an entry in the post index), and
//! [`CompiledPost`] (a single post ready for rendering).

use serde::{Deserialize, Serialize};

use crate::toc::TocHeading;

/// The front-matter of a post. Every field is optional at parse time;
/// [`crate::compile::Compiler`] is the one that insists on `title` and
/// `date`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostMeta {
    /// The title of the post.
    pub title: String,

    /// The publication date, either `YYYY-MM-DD` or a full timestamp.
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tags in authored order. Order is kept for display only; matching
    /// treats them as a set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,

    /// OpenGraph image path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// The series this post belongs to (e.g., `kubernetes-homelab`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    /// Position within the series (1, 2, 3, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_order: Option<u32>,
}

impl PostMeta {
    /// Returns the series name if the post belongs to a non-empty series.
    pub fn series(&self) -> Option<&str> {
        self.series.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An entry in the post index: the front-matter plus the identifier and the
/// estimated reading time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,

    #[serde(flatten)]
    pub meta: PostMeta,

    /// Estimated minutes to read; always at least 1.
    pub read_time: u32,
}

/// A single post, validated and rendered. `C` is whatever the
/// [`crate::compile::Renderer`] produces; for the bundled markdown renderer
/// it's an HTML string.
#[derive(Clone, Debug, Serialize)]
pub struct CompiledPost<C = String> {
    pub slug: String,
    pub meta: PostMeta,
    pub content: C,
    pub headings: Vec<TocHeading>,
}
