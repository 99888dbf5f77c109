use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod config;
mod history;
mod render;

#[derive(Parser)]
#[command(name = "benchboard")]
#[command(about = "Benchmark history tables with inline trend sparklines")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "BENCHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the benchmark table from a history location
    Render(render::RenderArgs),
    /// Append `go test -bench` output to a history directory
    Ingest(history::IngestArgs),
    /// Generate the benchmark documentation page
    Page(history::PageArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render(args) => render::handle_command(args, cli.config.as_deref()).await,
        Commands::Ingest(args) => history::handle_ingest(args, cli.config.as_deref()),
        Commands::Page(args) => history::handle_page(args, cli.config.as_deref()).await,
        Commands::Config { action } => config::handle_command(action, cli.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
