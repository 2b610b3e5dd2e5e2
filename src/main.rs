//! CLI entry point for inkpost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost::query::{BrowseFilter, SortOrder};

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(version)]
#[command(about = "Browse, search and render a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, tags or authors
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, author)
        #[arg(default_value = "post")]
        r#type: String,

        /// Sort order for posts (date_desc, date_asc, title_asc, title_desc)
        #[arg(short, long, default_value = "date_desc")]
        sort: SortOrder,

        /// Only posts matching this text
        #[arg(short, long)]
        query: Option<String>,

        /// Only posts with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only posts by this exact author name
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Render a post to HTML
    Show {
        /// Post slug (file name without extension)
        slug: String,

        /// Print the whole post page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search posts by title, description, tags, or author
    #[command(alias = "s")]
    Search {
        /// Search text
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },

    /// List posts with a tag
    Tag {
        /// Tag name (may be percent-encoded)
        tag: String,
    },

    /// Show an author and their posts
    Author {
        /// Author slug or slugified name
        slug: String,
    },

    /// Validate posts and author profiles
    Check {
        /// Keep watching and re-validate on changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpost=debug,info"
    } else {
        "inkpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List {
            r#type,
            sort,
            query,
            tag,
            author,
        } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            let filter = BrowseFilter {
                query,
                tag,
                author,
                sort,
            };
            inkpost::commands::list::run(&blog, &r#type, &filter)?;
        }

        Commands::Show { slug, json } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::show::run(&blog, &slug, json)?;
        }

        Commands::Search { query } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::search::run(&blog, &query.join(" "))?;
        }

        Commands::Tag { tag } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::list::run_tag(&blog, &tag)?;
        }

        Commands::Author { slug } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::list::run_author(&blog, &slug)?;
        }

        Commands::Check { watch } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            tracing::info!("Checking content in {:?}", blog.base_dir);
            if watch {
                inkpost::commands::check::watch(&blog).await?;
            } else {
                inkpost::commands::check::run(&blog)?;
            }
        }

        Commands::Version => {
            println!("inkpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
