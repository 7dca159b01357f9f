//! Series navigation: posts that share a `series` are read in `seriesOrder`,
//! and each post page links to its neighbors.

use serde::Serialize;

use crate::index::find;
use crate::post::PostSummary;

/// The position given to series posts without a `seriesOrder`, which puts
/// them after every numbered post.
pub const SERIES_ORDER_LAST: u32 = 999;

/// Where a post sits in its series.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesNavigation {
    pub prev: Option<PostSummary>,
    pub next: Option<PostSummary>,

    /// Every post in the series, in reading order. Empty if the post isn't
    /// part of a series.
    pub all_in_series: Vec<PostSummary>,
}

impl SeriesNavigation {
    pub fn is_empty(&self) -> bool {
        self.all_in_series.is_empty()
    }
}

fn series_order(post: &PostSummary) -> u32 {
    post.meta.series_order.unwrap_or(SERIES_ORDER_LAST)
}

/// Returns the posts of `series` in reading order. Posts with the same
/// position keep their order from `posts`.
pub fn series_posts(posts: &[PostSummary], series: &str) -> Vec<PostSummary> {
    let mut in_series: Vec<PostSummary> = posts
        .iter()
        .filter(|p| p.meta.series() == Some(series))
        .cloned()
        .collect();
    in_series.sort_by_key(series_order);
    in_series
}

/// Finds the previous and next posts in the series of the post `slug`.
/// Returns an empty [`SeriesNavigation`] if the post isn't in `posts` or has
/// no series.
pub fn navigate(posts: &[PostSummary], slug: &str) -> SeriesNavigation {
    let series = match find(posts, slug).and_then(|p| p.meta.series()) {
        Some(series) => series,
        None => return SeriesNavigation::default(),
    };

    let all_in_series = series_posts(posts, series);
    let position = all_in_series.iter().position(|p| p.slug == slug);
    let (prev, next) = match position {
        Some(i) => (
            i.checked_sub(1).and_then(|j| all_in_series.get(j)).cloned(),
            all_in_series.get(i + 1).cloned(),
        ),
        None => (None, None),
    };

    SeriesNavigation {
        prev,
        next,
        all_in_series,
    }
}
