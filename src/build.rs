//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the site's data files: indexing the posts
//! ([`crate::index`]), compiling each post page ([`crate::compile`]) along
//! with its series navigation and related posts, and generating the Atom
//! feed and the sitemap.
//!
//! The output directory ends up looking like this:
//!
//! ```text
//! feed.atom
//! sitemap.xml
//! posts.json          # the index
//! posts/{slug}.json   # one per indexed post
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::compile::Compiler;
use crate::config::Config;
use crate::feed::{self, Error as FeedError, FeedConfig};
use crate::index::build_index;
use crate::markdown::Markdown;
use crate::post::{CompiledPost, PostSummary};
use crate::related::recommend;
use crate::series::{navigate, SeriesNavigation};
use crate::sitemap;
use crate::store::{self, Directory};

/// Everything a post page needs, written to `posts/{slug}.json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    #[serde(flatten)]
    pub post: CompiledPost,

    #[serde(skip_serializing_if = "SeriesNavigation::is_empty")]
    pub series: SeriesNavigation,

    pub related: Vec<PostSummary>,
}

/// Builds the site from a [`Config`] object into `output_dir`. The posts
/// output directory is wiped first so removed posts don't linger.
pub fn build_site(config: &Config, output_dir: &Path) -> Result<()> {
    let store = Directory::new(&config.posts_directory);
    let posts = build_index(&store, config.include_drafts)?;
    tracing::info!(posts = posts.len(), "indexed posts");

    let posts_output_directory = output_dir.join("posts");
    rmdir(&posts_output_directory)?;
    mkdir(&posts_output_directory)?;

    write_json(&output_dir.join("posts.json"), &posts)?;

    let compiler = Compiler::new(
        &store,
        Markdown::new().with_posts_path(config.posts_url_path()),
    );
    let now = Utc::now();
    let mut written = 0;
    for summary in &posts {
        let post = match compiler.compile(&summary.slug) {
            Some(post) => post,
            None => {
                tracing::warn!(slug = %summary.slug, "skipping post that doesn't compile");
                continue;
            }
        };
        let page = PostPage {
            series: navigate(&posts, &summary.slug),
            related: recommend(&posts, &summary.slug, config.related_limit, now),
            post,
        };
        write_json(
            &posts_output_directory.join(format!("{}.json", summary.slug)),
            &page,
        )?;
        written += 1;
    }
    tracing::info!(pages = written, "wrote post pages");

    feed::write_feed(
        &FeedConfig::from_config(config),
        &posts,
        BufWriter::new(create(&output_dir.join("feed.atom"))?),
    )?;
    tracing::info!("wrote feed");

    let xml = sitemap::render(
        &config.site_url,
        &config.posts_path,
        &posts,
        &config.static_last_modified,
    )?;
    let path = output_dir.join("sitemap.xml");
    fs::write(&path, xml).map_err(|err| Error::Write { path, err })?;
    tracing::info!("wrote sitemap");

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    // Nested post ids (`notes/hello`) need their own directories.
    if let Some(parent) = path.parent() {
        mkdir(parent)?;
    }
    let file = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(file, value).map_err(|err| Error::Json {
        path: path.to_owned(),
        err,
    })
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|err| Error::Write {
        path: path.to_owned(),
        err,
    })
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during indexing,
/// cleaning output directories, writing output files, and generating the
/// feed or sitemap.
#[derive(Debug)]
pub enum Error {
    /// Returned when the posts can't be listed.
    Index(store::Error),

    /// Returned for I/O problems while cleaning or creating output
    /// directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while writing an output file.
    Write { path: PathBuf, err: std::io::Error },

    /// Returned when a data file can't be serialized.
    Json {
        path: PathBuf,
        err: serde_json::Error,
    },

    /// Returned for errors writing the feed.
    Feed(FeedError),

    /// Returned when a post date can't go into the sitemap.
    Sitemap(crate::date::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Indexing posts: {}", err),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
            Error::Json { path, err } => {
                write!(f, "Serializing '{}': {}", path.display(), err)
            }
            Error::Feed(err) => write!(f, "Writing feed: {}", err),
            Error::Sitemap(err) => write!(f, "Writing sitemap: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
            Error::Json { path: _, err } => Some(err),
            Error::Feed(err) => Some(err),
            Error::Sitemap(err) => Some(err),
        }
    }
}

impl From<store::Error> for Error {
    /// Converts [`store::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: store::Error) -> Error {
        Error::Index(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

impl From<crate::date::Error> for Error {
    /// Converts [`crate::date::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: crate::date::Error) -> Error {
        Error::Sitemap(err)
    }
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

fn mkdir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| Error::Clean {
        path: dir.to_owned(),
        err,
    })
}
