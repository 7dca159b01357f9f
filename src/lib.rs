//! The library code for the `folio` blog engine. It turns a directory of
//! markdown posts with YAML front-matter into the data a blog needs:
//!
//! 1. The post index: every published post's metadata and reading time,
//!    newest first ([`crate::index`])
//! 2. Single post pages: rendered HTML with heading anchors and a table of
//!    contents ([`crate::compile`], [`crate::markdown`], [`crate::toc`])
//! 3. Views derived from the index: series navigation ([`crate::series`]),
//!    related posts ([`crate::related`]), tags ([`crate::tag`]) and yearly
//!    archives ([`crate::archive`])
//! 4. Syndication: the Atom feed ([`crate::feed`]) and the sitemap
//!    ([`crate::sitemap`])
//!
//! [`crate::build`] ties these together and writes them to disk. Posts are
//! read through the [`store::DocumentStore`] trait, so everything except the
//! build step also works on in-memory posts ([`store::Memory`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod anchor;
pub mod archive;
pub mod build;
pub mod compile;
pub mod components;
pub mod config;
pub mod date;
pub mod feed;
pub mod frontmatter;
pub mod index;
pub mod markdown;
pub mod post;
pub mod read_time;
pub mod related;
pub mod series;
pub mod sitemap;
pub mod store;
pub mod tag;
pub mod toc;
