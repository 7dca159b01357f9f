//! Related-post recommendations. Every other post is scored against the
//! target:
//!
//! * `+10` for each tag shared with the target (exact, case-sensitive),
//! * `+15` if both posts are in the same series,
//! * up to `+5` for being recent, decaying by one point per 100 days since
//!   the candidate was published.
//!
//! Posts scoring zero or less are dropped. Because of the recency term,
//! scores depend on when they're computed, so `now` is a parameter and
//! results shouldn't be cached for long.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::date;
use crate::index::find;
use crate::post::{PostMeta, PostSummary};

pub const SHARED_TAG_SCORE: f64 = 10.0;
pub const SAME_SERIES_SCORE: f64 = 15.0;
pub const MAX_RECENCY_SCORE: f64 = 5.0;

/// Days of age that cost one point of recency score.
pub const RECENCY_DECAY_DAYS: f64 = 100.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Scores `candidate` as a recommendation for a reader of `target`.
pub fn score(target: &PostMeta, candidate: &PostMeta, now: DateTime<Utc>) -> f64 {
    let target_tags: HashSet<&str> = target.tags.iter().map(String::as_str).collect();
    let shared = candidate
        .tags
        .iter()
        .map(String::as_str)
        .collect::<HashSet<&str>>()
        .intersection(&target_tags)
        .count();

    let mut score = shared as f64 * SHARED_TAG_SCORE;
    if let (Some(a), Some(b)) = (target.series(), candidate.series()) {
        if a == b {
            score += SAME_SERIES_SCORE;
        }
    }
    score + recency(candidate, now)
}

fn recency(post: &PostMeta, now: DateTime<Utc>) -> f64 {
    match date::parse_instant(&post.date) {
        Ok(published) => {
            let days = (now - published).num_milliseconds() as f64 / MILLIS_PER_DAY;
            (MAX_RECENCY_SCORE - days / RECENCY_DECAY_DAYS).max(0.0)
        }
        Err(_) => 0.0,
    }
}

/// Returns up to `limit` posts related to the post `slug`, best first. Ties
/// keep the order of `posts`. An unknown slug yields no recommendations.
pub fn recommend(
    posts: &[PostSummary],
    slug: &str,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<PostSummary> {
    let target = match find(posts, slug) {
        Some(target) => target,
        None => return Vec::new(),
    };

    let mut scored: Vec<(f64, &PostSummary)> = posts
        .iter()
        .filter(|p| p.slug != slug)
        .map(|p| (score(&target.meta, &p.meta, now), p))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    scored.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, post)| post.clone())
        .collect()
}
