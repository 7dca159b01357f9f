//! Compiles a single post for its own page: loads it, checks that it has the
//! fields every rendered post needs, renders the body and builds the table of
//! contents.

use crate::components::Components;
use crate::frontmatter;
use crate::post::CompiledPost;
use crate::store::{self, DocumentStore};
use crate::toc::extract_headings;

/// Turns a post body into displayable content. Implementations must anchor
/// headings with [`crate::anchor::Slugger`] so the table of contents links
/// resolve.
pub trait Renderer {
    /// Whatever the renderer produces, e.g. an HTML string.
    type Content;

    type Error: std::error::Error + Send + Sync + 'static;

    fn render(
        &self,
        body: &str,
        components: &Components,
    ) -> std::result::Result<Self::Content, Self::Error>;
}

/// Compiles posts from a [`DocumentStore`] with a [`Renderer`].
pub struct Compiler<'a, S: ?Sized, R> {
    store: &'a S,
    renderer: R,
    components: Components,
}

impl<'a, S: DocumentStore + ?Sized, R: Renderer> Compiler<'a, S, R> {
    /// Creates a compiler using the default [`Components`].
    pub fn new(store: &'a S, renderer: R) -> Compiler<'a, S, R> {
        Compiler {
            store,
            renderer,
            components: Components::default(),
        }
    }

    pub fn with_components(mut self, components: Components) -> Compiler<'a, S, R> {
        self.components = components;
        self
    }

    /// Compiles the post with the given slug. Returns `None` if the post
    /// doesn't exist, can't be parsed or rendered, or is missing its `title`
    /// or `date`; callers only ever need to know "not found". Drafts compile
    /// like any other post.
    pub fn compile(&self, slug: &str) -> Option<CompiledPost<R::Content>> {
        match self.try_compile(slug) {
            Ok(post) => Some(post),
            Err(err) => {
                tracing::debug!(%slug, %err, "post not compiled");
                None
            }
        }
    }

    /// Like [`Compiler::compile`], but says why a post didn't compile.
    pub fn try_compile(&self, slug: &str) -> Result<CompiledPost<R::Content>> {
        let raw = self.store.read(slug)?;
        let (meta, body) = frontmatter::parse(&raw)?;

        if meta.title.trim().is_empty() {
            return Err(Error::InvalidContent("title"));
        }
        if meta.date.trim().is_empty() {
            return Err(Error::InvalidContent("date"));
        }

        let content = self
            .renderer
            .render(body, &self.components)
            .map_err(|err| Error::Render(Box::new(err)))?;

        Ok(CompiledPost {
            slug: slug.to_owned(),
            meta,
            content,
            headings: extract_headings(body),
        })
    }
}

/// Represents the result of compiling a post.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents the reason a post didn't compile.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the post couldn't be read (including unknown slugs).
    #[error(transparent)]
    Store(#[from] store::Error),

    /// Returned when the post's front-matter is malformed.
    #[error(transparent)]
    Frontmatter(#[from] frontmatter::Error),

    /// Returned when a required front-matter field is missing or empty.
    #[error("missing required field `{0}`")]
    InvalidContent(&'static str),

    /// Returned when the renderer fails.
    #[error("rendering: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}
