//! Builds the table of contents for a post from its raw markdown body.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::anchor::Slugger;

/// A heading that participates in in-page navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocHeading {
    /// The heading's anchor, identical to the `id` the renderer assigns.
    pub id: String,

    /// The heading text as written.
    pub text: String,

    /// 2 or 3.
    pub level: u8,
}

/// The heading levels that show up in the table of contents.
const TOC_LEVELS: std::ops::RangeInclusive<u8> = 2..=3;

static FENCED_CODE: OnceLock<Regex> = OnceLock::new();
static ATX_HEADING: OnceLock<Regex> = OnceLock::new();
static CONTAINER_MARKERS: OnceLock<Regex> = OnceLock::new();

fn fenced_code() -> &'static Regex {
    FENCED_CODE.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap())
}

fn atx_heading() -> &'static Regex {
    ATX_HEADING
        .get_or_init(|| Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").unwrap())
}

// Blockquote (`> `) and list item (`- `, `1. `) markers, possibly nested.
fn container_markers() -> &'static Regex {
    CONTAINER_MARKERS.get_or_init(|| {
        Regex::new(r"^(?: {0,3}(?:>[ \t]?|(?:[-*+]|[0-9]{1,9}[.)])[ \t]+))+").unwrap()
    })
}

/// Extracts the level 2 and 3 headings from `body`, in document order.
///
/// Fenced code blocks are removed before scanning, so example snippets that
/// contain heading-like lines never end up in the table of contents. Headings
/// at other levels don't appear in the output, but they still claim their
/// anchors so duplicate numbering lines up with the renderer. The same goes
/// for headings inside blockquotes and list items: they aren't listed, but
/// they take their anchor first.
pub fn extract_headings(body: &str) -> Vec<TocHeading> {
    let without_code = fenced_code().replace_all(body, "");
    let mut slugger = Slugger::new();
    let mut headings = Vec::new();

    for line in without_code.lines() {
        let line = line.trim_end_matches('\r');
        let (nested, line) = match container_markers().find(line) {
            Some(m) => (true, &line[m.end()..]),
            None => (false, line),
        };
        let captures = match atx_heading().captures(line) {
            Some(captures) => captures,
            None => continue,
        };

        let level = captures[1].len() as u8;
        let text = captures[2].trim();
        let id = slugger.slug(text);
        if !nested && TOC_LEVELS.contains(&level) {
            headings.push(TocHeading {
                id,
                text: text.to_owned(),
                level,
            });
        }
    }

    headings
}

#[cfg(test)]
mod test {
    use super::*;

    fn heading(id: &str, text: &str, level: u8) -> TocHeading {
        TocHeading {
            id: id.to_owned(),
            text: text.to_owned(),
            level,
        }
    }

    #[test]
    fn test_extract_h2_and_h3() {
        let body = "## First Heading
Some content here

### Nested Heading
More content

## Second Heading
Final content";

        assert_eq!(
            extract_headings(body),
            vec![
                heading("first-heading", "First Heading", 2),
                heading("nested-heading", "Nested Heading", 3),
                heading("second-heading", "Second Heading", 2),
            ]
        );
    }

    #[test]
    fn test_ignores_other_levels() {
        let body = "# Page Title
## Included H2
### Included H3
#### Not Included H4";

        assert_eq!(
            extract_headings(body),
            vec![
                heading("included-h2", "Included H2", 2),
                heading("included-h3", "Included H3", 3),
            ]
        );
    }

    #[test]
    fn test_empty_without_headings() {
        assert!(extract_headings("Just some regular content\nwith no headings at all").is_empty());
        assert!(extract_headings("").is_empty());
    }

    #[test]
    fn test_ignores_headings_in_code_blocks() {
        let body = "## Real Heading

Some content here.

```markdown
## Fake Heading in Code
### Another Fake Heading
```

## Another Real Heading";

        assert_eq!(
            extract_headings(body),
            vec![
                heading("real-heading", "Real Heading", 2),
                heading("another-real-heading", "Another Real Heading", 2),
            ]
        );
    }

    #[test]
    fn test_ignores_headings_in_multiple_code_blocks() {
        let body = "## First Heading

```js
// ## This is not a heading
console.log(\"test\");
```

### Real Subheading

```python
## Also not a heading
### Neither is this
```

## Last Heading";

        assert_eq!(
            extract_headings(body),
            vec![
                heading("first-heading", "First Heading", 2),
                heading("real-subheading", "Real Subheading", 3),
                heading("last-heading", "Last Heading", 2),
            ]
        );
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let body = "## Setup\n## Setup\n### Setup\n## Other";
        assert_eq!(
            extract_headings(body),
            vec![
                heading("setup", "Setup", 2),
                heading("setup-1", "Setup", 2),
                heading("setup-2", "Setup", 3),
                heading("other", "Other", 2),
            ]
        );
    }

    #[test]
    fn test_nested_headings_claim_anchors() {
        let body = "> ## Setup\n\n- ## Setup\n\n## Setup\n\n> Quoted text, not a heading";
        assert_eq!(extract_headings(body), vec![heading("setup-2", "Setup", 2)]);
    }

    #[test]
    fn test_special_characters_and_emoji() {
        let body = "## What's Next?\n## 👋 Welcome";
        assert_eq!(
            extract_headings(body),
            vec![
                heading("whats-next", "What's Next?", 2),
                heading("-welcome", "👋 Welcome", 2),
            ]
        );
    }

    #[test]
    fn test_requires_space_after_hashes() {
        let body = "##NoSpace\n## Spaced";
        assert_eq!(extract_headings(body), vec![heading("spaced", "Spaced", 2)]);
    }

    #[test]
    fn test_closing_hashes_and_trailing_whitespace() {
        let body = "## Closed ##\r\n### Padded   \n## C#";
        assert_eq!(
            extract_headings(body),
            vec![
                heading("closed", "Closed", 2),
                heading("padded", "Padded", 3),
                heading("c", "C#", 2),
            ]
        );
    }

    #[test]
    fn test_other_levels_claim_anchors() {
        let body = "# Intro\n## Intro";
        assert_eq!(extract_headings(body), vec![heading("intro-1", "Intro", 2)]);
    }
}
