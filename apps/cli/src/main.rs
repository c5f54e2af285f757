//! # Panier CLI
//!
//! Drives the cart from the command line. Each invocation is one UI event:
//! it loads the cart from the data file, runs one operation, persists, and
//! prints the result.
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging to stderr)
//! 3. Load configuration (defaults → panier.toml → PANIER_* env)
//! 4. Open the file store and build the controller
//! 5. Run the subcommand

mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use panier_store::{CartController, CartStore, FileStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{Command, Context};
use config::PanierConfig;

/// Panier - a persistent shopping cart with promo codes
#[derive(Parser)]
#[command(name = "panier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = PanierConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let data_path = config.data_path();
    debug!(path = %data_path.display(), "Using cart data file");

    let mut store = CartStore::new(FileStore::open(&data_path));
    store.subscribe(|count: u32| info!(count, "Cart count changed"));

    let controller = CartController::new(store)
        .with_engine(config.promo_engine())
        .with_formatter(config.formatter())
        .with_placeholder_image(config.display.placeholder_image.clone());

    let mut ctx = Context::new(controller, cli.json);
    commands::run(cli.command, &mut ctx)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `--verbose` - Default to debug for panier crates
/// - Default: WARN level, so normal output stays clean
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,panier_core=debug,panier_store=debug,panier_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
