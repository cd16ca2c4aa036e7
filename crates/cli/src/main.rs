use anyhow::Result;
use clap::{Parser, Subcommand};
use fileinfo_cli::commands;
use fileinfo_core::config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Resolve { uris, json } => {
            commands::run_resolve(&cfg, &uris, json, &mut stdout).await
        }
        Commands::Scan {
            roots,
            exclude,
            hidden,
            json,
        } => commands::run_scan(&cfg, roots, exclude, hidden, json, &mut stdout).await,
    }
}

#[derive(Parser)]
#[command(name = "fileinfo")]
#[command(about = "Resolve file metadata: uri, display name, MIME type, size", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve file URIs or paths into records
    Resolve {
        /// file:// URIs or local paths
        #[arg(required = true)]
        uris: Vec<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve every file under the given roots (defaults to scan.include)
    Scan {
        roots: Vec<PathBuf>,
        /// Extra glob patterns to skip
        #[arg(long)]
        exclude: Vec<String>,
        /// Include dotfiles and dot-directories
        #[arg(long, default_value_t = false)]
        hidden: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}
