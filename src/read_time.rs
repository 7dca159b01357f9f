//! Reading-time estimates for posts.

/// Assumed reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimates the minutes needed to read `body`, rounded up and never less
/// than one. Words are whitespace-separated runs of the raw markdown, so
/// markup counts too.
pub fn estimate(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    minutes.max(1) as u32
}
