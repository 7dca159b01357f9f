//! Heading anchor generation. Both the table of contents
//! ([`crate::toc`]) and the markdown renderer ([`crate::markdown`]) assign
//! anchors through [`Slugger`], which is what keeps TOC links pointing at the
//! right headings.

use std::collections::HashMap;

/// Converts heading text into an anchor: lowercases it, drops everything that
/// isn't a letter, number, `-`, `_` or whitespace, then turns each whitespace
/// character into `-`.
///
/// ```
/// use folio::anchor::slugify;
///
/// assert_eq!(slugify("What's Next?"), "whats-next");
/// assert_eq!(slugify("C++ & Rust"), "c--rust");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Hands out unique anchors for one document. The first occurrence of a slug
/// is returned as is; repeats get `-1`, `-2`, ... appended.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Slugger {
        Slugger::default()
    }

    /// Returns a slug for `text` that hasn't been handed out by this slugger
    /// yet.
    pub fn slug(&mut self, text: &str) -> String {
        let original = slugify(text);
        let mut result = original.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{}-{}", original, count);
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }

    /// Forgets every slug handed out so far.
    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("How This Content Is Approached"), "how-this-content-is-approached");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
        assert_eq!(slugify("Café naïve"), "café-naïve");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_emoji() {
        assert_eq!(slugify("👋 Welcome"), "-welcome");
        assert_eq!(slugify("🧠 What You'll Find Here"), "-what-youll-find-here");
    }

    #[test]
    fn test_slugger_duplicates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("setup"), "setup-2");
        assert_eq!(slugger.slug("Other"), "other");
    }

    #[test]
    fn test_slugger_skips_taken_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Step 1"), "step-1");
        assert_eq!(slugger.slug("Step"), "step");
        assert_eq!(slugger.slug("Step"), "step-2");
    }

    #[test]
    fn test_slugger_reset() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Intro"), "intro");
        slugger.reset();
        assert_eq!(slugger.slug("Intro"), "intro");
    }
}
