//! Splits a raw post into its YAML front-matter and its markdown body. Each
//! post source file is structured as follows:
//!
//! 1. Initial front-matter fence (`---`)
//! 2. YAML front-matter
//! 3. Terminal front-matter fence (`---`)
//! 4. Post body
//!
//! For example:
//!
//! ```md
//! ---
//! title: Hello, world!
//! date: 2021-04-16
//! tags: [greet]
//! ---
//! ## Hello
//!
//! World
//! ```
//!
//! A document that doesn't begin with a fence has no front-matter at all; it
//! parses to an empty [`PostMeta`] and the whole text is the body.

use crate::post::PostMeta;

const FENCE: &str = "---";

/// Parses `input` into its front-matter and body. No field validation is
/// done here.
pub fn parse(input: &str) -> Result<(PostMeta, &str)> {
    let (yaml, body) = match split(input)? {
        Some(parts) => parts,
        None => return Ok((PostMeta::default(), input)),
    };

    if yaml.trim().is_empty() {
        return Ok((PostMeta::default(), body));
    }
    let meta: Option<PostMeta> = serde_yaml::from_str(yaml)?;
    Ok((meta.unwrap_or_default(), body))
}

// Returns `(yaml, body)` or `None` if there is no opening fence.
fn split(input: &str) -> Result<Option<(&str, &str)>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let (first, rest) = match input.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (input, ""),
    };
    if first.trim_end() != FENCE {
        return Ok(None);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Ok(Some((&rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }
    Err(Error::MissingEndFence)
}

/// Represents the result of a front-matter parse.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing front-matter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a post opens a front-matter fence (`---`) but never
    /// closes it.
    #[error("missing closing `---`")]
    MissingEndFence,

    /// Returned when there was an error parsing the front-matter as YAML.
    #[error("invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_full_frontmatter() -> Result<()> {
        let input = r#"---
title: "Building a Homelab"
date: 2025-01-15
description: Racks, switches and regret
tags: ["homelab", "kubernetes"]
draft: true
image: /images/rack.jpg
series: kubernetes-homelab
seriesOrder: 2
---
## Hardware

Body text.
"#;
        let (meta, body) = parse(input)?;
        assert_eq!(meta.title, "Building a Homelab");
        assert_eq!(meta.date, "2025-01-15");
        assert_eq!(meta.description.as_deref(), Some("Racks, switches and regret"));
        assert_eq!(meta.tags, vec!["homelab", "kubernetes"]);
        assert!(meta.draft);
        assert_eq!(meta.image.as_deref(), Some("/images/rack.jpg"));
        assert_eq!(meta.series(), Some("kubernetes-homelab"));
        assert_eq!(meta.series_order, Some(2));
        assert_eq!(body, "## Hardware\n\nBody text.\n");
        Ok(())
    }

    #[test]
    fn test_parse_minimal() -> Result<()> {
        let (meta, body) = parse("---\ntitle: Minimal\n---\nContent here.")?;
        assert_eq!(meta.title, "Minimal");
        assert_eq!(meta.date, "");
        assert!(meta.tags.is_empty());
        assert!(!meta.draft);
        assert_eq!(meta.series_order, None);
        assert_eq!(body, "Content here.");
        Ok(())
    }

    #[test]
    fn test_parse_no_frontmatter() -> Result<()> {
        let input = "## Just Content\n\nNo front-matter here.";
        let (meta, body) = parse(input)?;
        assert_eq!(meta, PostMeta::default());
        assert_eq!(body, input);
        Ok(())
    }

    #[test]
    fn test_parse_empty_frontmatter() -> Result<()> {
        let (meta, body) = parse("---\n---\nbody")?;
        assert_eq!(meta, PostMeta::default());
        assert_eq!(body, "body");
        Ok(())
    }

    #[test]
    fn test_parse_frontmatter_without_body() -> Result<()> {
        let (meta, body) = parse("---\ntitle: T\ndate: \"2025-01-01\"\n---")?;
        assert_eq!(meta.title, "T");
        assert_eq!(body, "");
        Ok(())
    }

    #[test]
    fn test_dashes_in_body_are_not_fences() -> Result<()> {
        let (_, body) = parse("---\ntitle: T\n---\nabove\n---\nbelow")?;
        assert_eq!(body, "above\n---\nbelow");
        Ok(())
    }

    #[test]
    fn test_missing_end_fence() {
        assert!(matches!(
            parse("---\ntitle: Never closed\n"),
            Err(Error::MissingEndFence)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse("---\ntitle: [unclosed\n---\nbody"),
            Err(Error::Yaml(_))
        ));
    }
}
