//! KLC Map - keyboard layout converter
//!
//! Turns a Keyboard Layout Creator source into a flat key table, keyboard grid
//! diagrams and a hotkey remap table.

use clap::{Parser, Subcommand};
use klcmap::cli::{CliError, ConfigArgs, ConvertArgs, ExtractArgs, GridArgs, RenderArgs};
use klcmap::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// KLC Map - convert Keyboard Layout Creator sources into tables and diagrams
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a layout into layout.ini, diagrams and optionally remap.json
    Convert(ConvertArgs),
    /// Extract the key block into layout.ini
    Extract(ExtractArgs),
    /// Print the reconstructed keyboard grid
    Grid(GridArgs),
    /// Render one shift layer as a PNG diagram
    Render(RenderArgs),
    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Extract(args) => args.execute(),
        Commands::Grid(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(CliError { code, message }) = result {
        eprintln!("Error: {message}");
        std::process::exit(code.code());
    }
}
