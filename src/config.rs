//! Project configuration, loaded from a `folio.yaml` file at the root of the
//! project:
//!
//! ```yaml
//! title: Brian's Tech Corner
//! site_url: https://example.com
//! author:
//!   name: Brian
//!   email: brian@example.com
//! posts_directory: content/blog   # default
//! posts_path: blog                # default
//! related_limit: 3                # default
//! include_drafts: false           # default
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "folio.yaml";

#[derive(Deserialize)]
struct RelatedLimit(usize);
impl Default for RelatedLimit {
    fn default() -> Self {
        RelatedLimit(3)
    }
}

#[derive(Deserialize)]
struct PostsDirectory(PathBuf);
impl Default for PostsDirectory {
    fn default() -> Self {
        PostsDirectory(PathBuf::from("content/blog"))
    }
}

#[derive(Deserialize)]
struct PostsPath(String);
impl Default for PostsPath {
    fn default() -> Self {
        PostsPath(String::from("blog"))
    }
}

#[derive(Deserialize)]
struct Project {
    title: String,
    site_url: Url,

    #[serde(default)]
    author: Option<Author>,

    #[serde(default)]
    posts_directory: PostsDirectory,

    #[serde(default)]
    posts_path: PostsPath,

    #[serde(default)]
    related_limit: RelatedLimit,

    #[serde(default)]
    include_drafts: bool,

    #[serde(default)]
    static_last_modified: Option<String>,
}

/// The site author, credited in the feed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// The resolved configuration for a project.
#[derive(Clone, Debug)]
pub struct Config {
    /// The directory containing `folio.yaml`.
    pub root_directory: PathBuf,

    /// Where post sources live.
    pub posts_directory: PathBuf,

    pub title: String,

    /// The public root of the site. Always ends in `/`.
    pub site_url: Url,

    pub author: Option<Author>,

    /// The URL path under which posts are served, without slashes (`blog`
    /// means posts live at `{site_url}blog/{slug}`).
    pub posts_path: String,

    /// How many related posts a post page shows.
    pub related_limit: usize,

    /// Whether drafts appear in listings (handy for local previews).
    pub include_drafts: bool,

    /// The `lastmod` for pages that don't change with the posts.
    pub static_last_modified: String,
}

/// The `lastmod` used for static pages unless configured.
pub const DEFAULT_STATIC_LAST_MODIFIED: &str = "2024-01-01T00:00:00.000Z";

impl Config {
    /// Looks for `folio.yaml` in `dir` and then in each of its ancestors,
    /// and loads the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(dir) = current {
            let path = dir.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
            current = dir.parent();
        }
        Err(Error::NotFound(dir.to_owned()))
    }

    /// Loads the project file at `path`. Relative paths in the file are
    /// resolved against the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file).map_err(|err| Error::Yaml {
            path: path.to_owned(),
            err,
        })?;
        let root_directory = path
            .parent()
            .map(Path::to_owned)
            .ok_or_else(|| Error::NoParent(path.to_owned()))?;
        Ok(Config::from_project(project, root_directory))
    }

    fn from_project(project: Project, root_directory: PathBuf) -> Config {
        let mut site_url = project.site_url;
        if !site_url.path().ends_with('/') {
            let path = format!("{}/", site_url.path());
            site_url.set_path(&path);
        }

        Config {
            posts_directory: root_directory.join(project.posts_directory.0),
            root_directory,
            title: project.title,
            site_url,
            author: project.author,
            posts_path: project.posts_path.0.trim_matches('/').to_owned(),
            related_limit: project.related_limit.0,
            include_drafts: project.include_drafts,
            static_last_modified: project
                .static_last_modified
                .unwrap_or_else(|| DEFAULT_STATIC_LAST_MODIFIED.to_owned()),
        }
    }

    /// The absolute URL of a post page.
    pub fn post_url(&self, slug: &str) -> Url {
        let mut url = self.site_url.clone();
        let path = format!("{}{}/{}", self.site_url.path(), self.posts_path, slug);
        url.set_path(&path);
        url
    }

    /// The URL path prefix for posts, e.g. `/blog/`. Includes the path of
    /// `site_url`, so it agrees with [`Config::post_url`].
    pub fn posts_url_path(&self) -> String {
        format!("{}{}/", self.site_url.path(), self.posts_path)
    }
}

/// Represents the result of loading configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when no `folio.yaml` exists in the directory or any parent.
    #[error("could not find `folio.yaml` in `{}` or any parent directory", .0.display())]
    NotFound(PathBuf),

    /// Returned when the project file can't be opened.
    #[error("opening project file `{}`: {err}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the project file isn't valid.
    #[error("parsing project file `{}`: {err}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        err: serde_yaml::Error,
    },

    /// Returned when the project file path has no parent directory.
    #[error("can't get parent directory for project file `{}`", .0.display())]
    NoParent(PathBuf),
}
