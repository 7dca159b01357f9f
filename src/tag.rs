//! Defines the [`Tag`] type and the tag views built from the post index: the
//! list of all tags with post counts, and the posts carrying a given tag.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::post::PostSummary;

/// A tag as it appears on the tags page.
#[derive(Clone, Debug, Serialize)]
pub struct Tag {
    /// The tag exactly as authors wrote it.
    pub name: String,

    /// The URL path segment for the tag's page. Slugified so e.g. `Home
    /// Assistant` can be dropped into a URL.
    pub slug: String,

    /// The number of posts carrying the tag.
    pub count: usize,
}

impl Tag {
    fn new(name: &str, count: usize) -> Tag {
        Tag {
            name: name.to_owned(),
            slug: url_segment(name),
            count,
        }
    }
}

/// Returns the URL path segment for a tag's page.
pub fn url_segment(name: &str) -> String {
    slug::slugify(name)
}

/// Returns every tag used by `posts` with its post count, sorted by name
/// (case-insensitively, then exactly).
pub fn tags(posts: &[PostSummary]) -> Vec<Tag> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for post in posts {
        let mut seen = Vec::with_capacity(post.meta.tags.len());
        for tag in &post.meta.tags {
            if !seen.contains(&tag) {
                seen.push(tag);
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut tags: Vec<Tag> = counts
        .into_iter()
        .map(|(name, count)| Tag::new(name, count))
        .collect();
    tags.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    tags
}

/// Returns the posts tagged `name`, in index order.
pub fn posts_with_tag<'a>(posts: &'a [PostSummary], name: &str) -> Vec<&'a PostSummary> {
    posts.iter().filter(|p| p.meta.has_tag(name)).collect()
}

/// Returns the posts whose tag slugifies to `slug`; this is what a tag page
/// at `/tags/{slug}` lists.
pub fn posts_with_tag_slug<'a>(posts: &'a [PostSummary], slug: &str) -> Vec<&'a PostSummary> {
    posts
        .iter()
        .filter(|p| p.meta.tags.iter().any(|t| url_segment(t) == slug))
        .collect()
}
