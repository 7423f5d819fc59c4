//! prodcon - runs a producer and a consumer over a bounded slot buffer.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{ConfigCommand, RunCommand};

/// prodcon - a producer and a consumer sharing a bounded slot buffer.
///
/// The producer waits a random delay, builds an item with a random value and
/// a random processing delay, and inserts it, blocking while the buffer is
/// full. The consumer removes items, blocking while the buffer is empty,
/// logs each value, and spends the item's delay working on it.
///
/// Settings come from an optional YAML file (--config) and can be
/// overridden per flag. RUST_LOG overrides the log filter.
#[derive(Parser)]
#[command(name = "prodcon")]
#[command(about = "Producer/consumer over a bounded slot buffer")]
#[command(version)]
pub struct Cli {
    /// Config file (YAML)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the producer and consumer until interrupted or drained
    Run(RunCommand),
    /// Print the resolved configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match &cli.command {
        Commands::Run(cmd) => cmd.run(&cli).await,
        Commands::Config(cmd) => cmd.run(&cli),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .init();
}
