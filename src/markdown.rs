//! The bundled [`Renderer`]: converts a post body from markdown to HTML with
//! [`pulldown_cmark`], assigning heading anchors with the same
//! [`Slugger`] the table of contents uses.

use std::convert::Infallible;

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::anchor::Slugger;
use crate::compile::Renderer;
use crate::components::{escape_html, is_internal, Component, Components};

const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".mdx"];

/// Renders markdown bodies to HTML.
#[derive(Clone, Debug)]
pub struct Markdown {
    options: Options,

    /// URL path prefix for posts (e.g., `/blog/`). Relative links to other
    /// post sources (`other-post.md`) are rewritten to `{posts_path}other-post`.
    posts_path: String,
}

impl Markdown {
    pub fn new() -> Markdown {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        Markdown {
            options,
            posts_path: String::from("/blog/"),
        }
    }

    pub fn with_posts_path<P: Into<String>>(mut self, posts_path: P) -> Markdown {
        let mut posts_path = posts_path.into();
        if !posts_path.ends_with('/') {
            posts_path.push('/');
        }
        if !posts_path.starts_with('/') {
            posts_path.insert(0, '/');
        }
        self.posts_path = posts_path;
        self
    }

    /// Converts `body` to HTML.
    pub fn to_html(&self, body: &str, components: &Components) -> String {
        let events = self.convert(body, components);
        let events = attach_heading_ids(events);
        let mut output = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        output
    }

    fn convert<'a>(&self, body: &'a str, components: &Components) -> Vec<Event<'a>> {
        struct OpenBlock<'c> {
            component: &'c dyn Component,
            args: String,
            body: String,
        }

        let mut events = Vec::new();
        let mut block: Option<OpenBlock> = None;
        // One entry per open link: whether we replaced it with raw HTML.
        let mut links: Vec<bool> = Vec::new();

        for ev in Parser::new_ext(body, self.options) {
            if let Some(open) = block.as_mut() {
                match ev {
                    Event::Text(text) => open.body.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let html = open.component.render(&open.args, &open.body);
                        events.push(Event::Html(CowStr::from(html)));
                        block = None;
                    }
                    _ => {}
                }
                continue;
            }

            if let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = &ev {
                if let Some((component, args)) = components.for_info(info) {
                    block = Some(OpenBlock {
                        component,
                        args: args.to_owned(),
                        body: String::new(),
                    });
                    continue;
                }
            }

            match ev {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    let dest = self.convert_link(&dest_url);
                    if components.external_links_in_new_tab && !is_internal(&dest) {
                        let mut html = format!("<a href=\"{}\"", escape_html(&dest));
                        if !title.is_empty() {
                            html.push_str(&format!(" title=\"{}\"", escape_html(&title)));
                        }
                        html.push_str(" target=\"_blank\" rel=\"noreferrer\">");
                        events.push(Event::InlineHtml(CowStr::from(html)));
                        links.push(true);
                    } else {
                        events.push(Event::Start(Tag::Link {
                            link_type,
                            dest_url: CowStr::from(dest),
                            title,
                            id,
                        }));
                        links.push(false);
                    }
                }
                Event::End(TagEnd::Link) => {
                    if links.pop().unwrap_or(false) {
                        events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                    } else {
                        events.push(Event::End(TagEnd::Link));
                    }
                }
                ev => events.push(ev),
            }
        }

        events
    }

    // Relative links to post sources (`other.md`, `./other.mdx#setup`) point
    // at the rendered post instead. Everything else passes through.
    fn convert_link(&self, url: &str) -> String {
        if url.contains("://") || url.starts_with('/') || url.starts_with('#') || url.contains(':') {
            return url.to_owned();
        }

        let (path, fragment) = match url.find('#') {
            Some(i) => (&url[..i], &url[i..]),
            None => (url, ""),
        };
        let path = path.trim_start_matches("./");
        for ext in MARKDOWN_EXTENSIONS {
            if let Some(stem) = path.strip_suffix(ext) {
                if stem.is_empty() || stem.starts_with("../") {
                    break;
                }
                let stem = stem.strip_suffix("/index").unwrap_or(stem);
                return format!("{}{}{}", self.posts_path, stem, fragment);
            }
        }
        url.to_owned()
    }
}

impl Default for Markdown {
    fn default() -> Markdown {
        Markdown::new()
    }
}

impl Renderer for Markdown {
    type Content = String;
    type Error = Infallible;

    fn render(&self, body: &str, components: &Components) -> Result<String, Infallible> {
        Ok(self.to_html(body, components))
    }
}

// Gives every heading an anchor, in document order, through one `Slugger`.
fn attach_heading_ids(events: Vec<Event>) -> Vec<Event> {
    let mut slugger = Slugger::new();
    let mut ids = Vec::new();
    let mut current: Option<String> = None;
    for ev in &events {
        match ev {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    ids.push(slugger.slug(heading.trim()));
                }
            }
            _ => {}
        }
    }

    let mut ids = ids.into_iter();
    events
        .into_iter()
        .map(|ev| match ev {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let generated = ids.next().map(CowStr::from);
                Event::Start(Tag::Heading {
                    level,
                    id: id.or(generated),
                    classes,
                    attrs,
                })
            }
            ev => ev,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::toc::extract_headings;

    fn render(body: &str) -> String {
        Markdown::new().to_html(body, &Components::default())
    }

    #[test]
    fn test_heading_ids() {
        let html = render("## Getting Started\n\ntext\n\n### Getting Started\n");
        assert!(html.contains("<h2 id=\"getting-started\">Getting Started</h2>"));
        assert!(html.contains("<h3 id=\"getting-started-1\">Getting Started</h3>"));
    }

    #[test]
    fn test_heading_ids_match_toc() {
        let body = "# Title

## What's Next?

```markdown
## Not a heading
```

### The `--force` flag

## *Emphasis* Heading ##

## What's Next?

#### Deep

## Deep

## Before -- After --- Done

> ## Quoted

## Quoted
";
        let html = render(body);
        let headings = extract_headings(body);
        assert_eq!(headings.len(), 7);
        assert_eq!(headings[5].id, "before----after-----done");
        assert_eq!(headings[6].id, "quoted-1");
        assert!(html.contains("<blockquote>\n<h2 id=\"quoted\">"));
        for heading in &headings {
            let needle = format!("<h{} id=\"{}\">", heading.level, heading.id);
            assert!(html.contains(&needle), "missing {} in {}", needle, html);
        }
        assert!(!html.contains("id=\"not-a-heading\""));
    }

    #[test]
    fn test_external_links_open_in_new_tab() {
        let html = render("[site](https://example.com \"Example\")");
        assert!(html.contains(
            "<a href=\"https://example.com\" title=\"Example\" target=\"_blank\" rel=\"noreferrer\">site</a>"
        ));
    }

    #[test]
    fn test_internal_links_untouched() {
        let html = render("[home](/about) and [section](#setup)");
        assert!(html.contains("<a href=\"/about\">home</a>"));
        assert!(html.contains("<a href=\"#setup\">section</a>"));
    }

    #[test]
    fn test_external_links_policy_off() {
        let mut components = Components::default();
        components.external_links_in_new_tab = false;
        let html = Markdown::new().to_html("[site](https://example.com)", &components);
        assert!(html.contains("<a href=\"https://example.com\">site</a>"));
    }

    #[test]
    fn test_post_links_rewritten() {
        let markdown = Markdown::new().with_posts_path("posts");
        assert_eq!(markdown.convert_link("other.md"), "/posts/other");
        assert_eq!(markdown.convert_link("./other.mdx#setup"), "/posts/other#setup");
        assert_eq!(markdown.convert_link("bundle/index.md"), "/posts/bundle");
        assert_eq!(markdown.convert_link("../outside.md"), "../outside.md");
        assert_eq!(markdown.convert_link("image.png"), "image.png");
        assert_eq!(markdown.convert_link("mailto:me@example.com"), "mailto:me@example.com");
        assert_eq!(markdown.convert_link("https://x.org/a.md"), "https://x.org/a.md");
    }

    #[test]
    fn test_components_render_fenced_blocks() {
        let html = render("```callout success\nIt **worked**.\n```\n\n```rust\nfn main() {}\n```\n");
        assert!(html.contains("<div class=\"callout callout-success\">"));
        assert!(html.contains("<strong>worked</strong>"));
        assert!(html.contains("<pre><code class=\"language-rust\">fn main() {}"));
    }

    #[test]
    fn test_renderer_trait() {
        let html = Markdown::new()
            .render("plain", &Components::empty())
            .unwrap();
        assert_eq!(html, "<p>plain</p>\n");
    }
}
