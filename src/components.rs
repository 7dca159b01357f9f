//! The component registry handed to the renderer. A component takes over the
//! rendering of a fenced block whose info string names it, e.g.
//!
//! ````md
//! ```callout warning
//! Back up your etcd data **before** upgrading.
//! ```
//! ````
//!
//! The registry also carries the link policy: internal links (`/...` or
//! `#...`) render as is, everything else opens in a new tab.

use std::collections::HashMap;
use std::fmt;

use pulldown_cmark::{html, Options, Parser};

/// Renders the contents of a fenced block to HTML.
pub trait Component: Send + Sync {
    /// `args` is whatever followed the component name in the info string
    /// (trimmed); `body` is the raw text of the block.
    fn render(&self, args: &str, body: &str) -> String;
}

/// Named components plus the link policy.
pub struct Components {
    blocks: HashMap<String, Box<dyn Component>>,

    /// Whether external links get `target="_blank" rel="noreferrer"`.
    pub external_links_in_new_tab: bool,
}

impl Components {
    /// A registry with no block components.
    pub fn empty() -> Components {
        Components {
            blocks: HashMap::new(),
            external_links_in_new_tab: true,
        }
    }

    /// Registers `component` under `name`, replacing any previous one.
    pub fn register<N: Into<String>, C: Component + 'static>(&mut self, name: N, component: C) {
        self.blocks.insert(name.into(), Box::new(component));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.blocks.get(name).map(|c| c.as_ref())
    }

    /// Looks up the component for a fenced block's info string, returning
    /// the component and the remaining arguments.
    pub fn for_info<'a>(&self, info: &'a str) -> Option<(&dyn Component, &'a str)> {
        let info = info.trim();
        let (name, args) = match info.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (info, ""),
        };
        self.get(name).map(|c| (c, args))
    }
}

impl Default for Components {
    /// The components every post can use: `callout` and `mermaid`.
    fn default() -> Components {
        let mut components = Components::empty();
        components.register("callout", Callout);
        components.register("mermaid", Mermaid);
        components
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<&String> = self.blocks.keys().collect();
        names.sort();
        f.debug_struct("Components")
            .field("blocks", &names)
            .field("external_links_in_new_tab", &self.external_links_in_new_tab)
            .finish()
    }
}

/// Returns whether a link target stays on the site.
pub fn is_internal(href: &str) -> bool {
    href.starts_with('/') || href.starts_with('#')
}

/// A boxed note. The first argument picks the flavor (`info`, `warning` or
/// `success`; anything else is `info`). The body is markdown.
pub struct Callout;

impl Component for Callout {
    fn render(&self, args: &str, body: &str) -> String {
        let kind = match args.split_whitespace().next() {
            Some(kind @ ("warning" | "success")) => kind,
            _ => "info",
        };
        let mut inner = String::new();
        html::push_html(&mut inner, Parser::new_ext(body, Options::ENABLE_STRIKETHROUGH));
        format!(
            "<div class=\"callout callout-{}\">\n{}</div>\n",
            kind, inner
        )
    }
}

/// A diagram rendered client-side by mermaid.js; the source is passed
/// through escaped.
pub struct Mermaid;

impl Component for Mermaid {
    fn render(&self, _args: &str, body: &str) -> String {
        format!("<pre class=\"mermaid\">{}</pre>\n", escape_html(body))
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
