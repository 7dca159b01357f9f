//! Support for creating Atom feeds from the post index.

use std::fmt;
use std::io::Write;

use atom_syndication::{
    CategoryBuilder, Entry, EntryBuilder, Error as AtomError, Feed, FeedBuilder, FixedDateTime,
    Link, LinkBuilder, Person, PersonBuilder, Text,
};
use chrono::{DateTime, Utc};

use crate::config::{Author, Config};
use crate::date;
use crate::post::PostSummary;

/// Bundled configuration for creating a feed.
pub struct FeedConfig<'a> {
    pub title: String,
    pub id: String,
    pub author: Option<Author>,
    pub home_page: String,

    /// Builds entry links from post slugs.
    pub config: &'a Config,
}

impl<'a> FeedConfig<'a> {
    pub fn from_config(config: &'a Config) -> FeedConfig<'a> {
        FeedConfig {
            title: config.title.clone(),
            id: config.site_url.to_string(),
            author: config.author.clone(),
            home_page: config.site_url.to_string(),
            config,
        }
    }
}

/// Creates a feed from some configuration ([`FeedConfig`]) and a list of
/// posts and writes the result to a [`std::io::Write`]. Every post date must
/// pass [`date::normalize`]; a bad date fails the whole feed.
pub fn write_feed<W: Write>(config: &FeedConfig, posts: &[PostSummary], w: W) -> Result<()> {
    feed(config, posts)?.write_to(w)?.flush()?;
    Ok(())
}

/// Builds the feed without writing it.
pub fn feed(config: &FeedConfig, posts: &[PostSummary]) -> Result<Feed> {
    let entries = feed_entries(config, posts)?;
    // The feed changes when its newest entry does.
    let updated = entries
        .iter()
        .map(|e| *e.updated())
        .max()
        .unwrap_or_else(|| Utc::now().fixed_offset());

    Ok(FeedBuilder::default()
        .title(config.title.as_str())
        .id(config.id.as_str())
        .updated(updated)
        .authors(author_to_people(config.author.as_ref()))
        .links(vec![alternate(&config.home_page)])
        .entries(entries)
        .build())
}

fn feed_entries(config: &FeedConfig, posts: &[PostSummary]) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = Vec::with_capacity(posts.len());

    for post in posts {
        let date = date::normalize(&post.meta.date)?;
        let date = to_fixed(date::parse_instant(&date)?);
        let url = config.config.post_url(&post.slug).to_string();

        entries.push(
            EntryBuilder::default()
                .id(url.as_str())
                .title(post.meta.title.as_str())
                .updated(date)
                .published(Some(date))
                .authors(author_to_people(config.author.as_ref()))
                .links(vec![alternate(&url)])
                .summary(post.meta.description.as_ref().map(|d| Text::plain(d.as_str())))
                .categories(
                    post.meta
                        .tags
                        .iter()
                        .map(|t| CategoryBuilder::default().term(t.as_str()).build())
                        .collect::<Vec<_>>(),
                )
                .build(),
        );
    }
    Ok(entries)
}

fn to_fixed(instant: DateTime<Utc>) -> FixedDateTime {
    instant.fixed_offset()
}

fn alternate(href: &str) -> Link {
    LinkBuilder::default().href(href).rel("alternate").build()
}

fn author_to_people(author: Option<&Author>) -> Vec<Person> {
    match author {
        Some(author) => vec![PersonBuilder::default()
            .name(author.name.as_str())
            .email(author.email.clone())
            .build()],
        None => Vec::new(),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed. Variants include I/O, Atom, and
/// post date issues.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an Atom-related error.
    Atom(AtomError),

    /// Returned when a post's date is malformed.
    Date(date::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Atom(err) => err.fmt(f),
            Error::Date(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Atom(err) => Some(err),
            Error::Date(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

impl From<date::Error> for Error {
    /// Converts [`date::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator when normalizing post dates.
    fn from(err: date::Error) -> Error {
        Error::Date(err)
    }
}
