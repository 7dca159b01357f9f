//! Command-line interface for the folio blog engine.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};

use folio::build::{build_site, PostPage};
use folio::compile::Compiler;
use folio::config::Config;
use folio::index::build_index;
use folio::markdown::Markdown;
use folio::related::recommend;
use folio::series::navigate;
use folio::store::Directory;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory; `folio.yaml` is searched for here and upwards
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List indexed posts, newest first
    List {
        /// Include drafts
        #[arg(long)]
        drafts: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compile a single post and print it as JSON
    Show {
        /// Post slug
        slug: String,
    },

    /// Write the feed, sitemap and post data files
    Build {
        /// Output directory (defaults to `public` in the project root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_directory(&cli.project)
        .with_context(|| format!("loading project from `{}`", cli.project.display()))?;

    match cli.command {
        Commands::List { drafts, json } => list(&config, drafts || config.include_drafts, json),
        Commands::Show { slug } => show(&config, &slug),
        Commands::Build { output } => {
            let output = output.unwrap_or_else(|| config.root_directory.join("public"));
            build_site(&config, &output)
                .with_context(|| format!("building site into `{}`", output.display()))
        }
    }
}

fn list(config: &Config, include_drafts: bool, json: bool) -> anyhow::Result<()> {
    let posts = build_index(&Directory::new(&config.posts_directory), include_drafts)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }
    for post in &posts {
        println!(
            "{:<10}  {:<32}  {}{}",
            post.meta.date.get(..10).unwrap_or(&post.meta.date),
            post.slug,
            post.meta.title,
            if post.meta.draft { " (draft)" } else { "" }
        );
    }
    Ok(())
}

fn show(config: &Config, slug: &str) -> anyhow::Result<()> {
    let store = Directory::new(&config.posts_directory);
    let compiler = Compiler::new(
        &store,
        Markdown::new().with_posts_path(config.posts_url_path()),
    );
    let post = compiler
        .compile(slug)
        .ok_or_else(|| anyhow!("post `{}` not found", slug))?;

    let posts = build_index(&store, config.include_drafts)?;
    let page = PostPage {
        series: navigate(&posts, slug),
        related: recommend(&posts, slug, config.related_limit, Utc::now()),
        post,
    };
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
