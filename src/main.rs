//! CLI entry point for spacetraveling

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spacetraveling::SpaceTraveling;

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version)]
#[command(about = "Server-rendered blog front-end for a Prismic repository", long_about = None)]
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
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List posts
    List {
        /// Follow pagination until every post is loaded
        #[arg(short, long)]
        all: bool,

        /// Print only post slugs
        #[arg(short, long)]
        uids: bool,
    },

    /// Show a post's header and reading time
    Show {
        /// Post slug
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,tower_http=debug,info"
    } else {
        "spacetraveling=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Server { port, ip, open } => {
            let site = SpaceTraveling::new(&base_dir)?;
            let client = Arc::new(site.client()?);
            tracing::info!("Reading posts from {}", client.endpoint());
            tracing::info!("Starting server at http://{}:{}", ip, port);
            spacetraveling::server::start(&site, client, &ip, port, open).await?;
        }

        Commands::List { all, uids } => {
            let site = SpaceTraveling::new(&base_dir)?;
            let client = site.client()?;
            let mut stdout = std::io::stdout().lock();
            if uids {
                spacetraveling::commands::list::run_uids(&client, &mut stdout).await?;
            } else {
                spacetraveling::commands::list::run(&site, &client, all, &mut stdout).await?;
            }
        }

        Commands::Show { slug } => {
            let site = SpaceTraveling::new(&base_dir)?;
            let client = site.client()?;
            let mut stdout = std::io::stdout().lock();
            spacetraveling::commands::show::run(&site, &client, &slug, &mut stdout).await?;
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
