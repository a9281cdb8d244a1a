//! # yearshelf CLI (`shelf`)
//!
//! The `shelf` binary serves the archive HTTP API and exposes the same
//! library operations from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! shelf --config ./config/shelf.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shelf serve` | Start the archive HTTP server |
//! | `shelf years` | List year directories under the archive root |
//! | `shelf folders <year>` | List folders inside a year |
//! | `shelf tree <year>` | Print the expanded tree for a year as JSON |
//! | `shelf ingest <url>` | Run one fetch-and-extract invocation |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use yearshelf::{config, ingest, listing, server, tree};

/// yearshelf CLI — serve and inspect a year-partitioned image archive.
#[derive(Parser)]
#[command(
    name = "shelf",
    about = "yearshelf — a year-partitioned image archive server",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/shelf.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the archive HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// the listing, tree, and download endpoints.
    Serve,

    /// List year directories under the archive root.
    Years,

    /// List folders inside a year directory.
    Folders {
        /// Year directory name (e.g., `2023`).
        year: String,
    },

    /// Print the fully expanded tree for a year as pretty JSON.
    Tree {
        /// Year directory name (e.g., `2023`).
        year: String,
    },

    /// Run one fetch-and-extract invocation for an archive URL.
    ///
    /// Prints the retrievable link on success. On failure, prints the
    /// captured diagnostics and exits non-zero.
    Ingest {
        /// URL of the compressed image archive.
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Years => {
            for year in listing::list_years(&cfg.archive.root).await? {
                println!("{}", year);
            }
        }
        Commands::Folders { year } => {
            for folder in listing::list_folders(&cfg.archive.root, &year).await? {
                println!("{}", folder);
            }
        }
        Commands::Tree { year } => {
            let year_dir = cfg.archive.root.join(&year);
            if tokio::fs::metadata(&year_dir).await.is_err() {
                anyhow::bail!("Year not found: {}", year);
            }
            let entries = tree::build_tree(year_dir).await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Ingest { url } => {
            let result = ingest::run_ingest(&cfg.ingest, &url).await?;
            if result.is_success() {
                println!("{}", result.link());
            } else {
                eprintln!("{}", result.failure_message());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
