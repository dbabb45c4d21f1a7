//! Reverie CLI - Turn a text prompt into AI-generated images and a slideshow.
//!
//! Reverie calls a hosted text-to-image model once per styled prompt
//! variation, saves the results as PNG files, and assembles them into a
//! short MP4 where each image is held for a few seconds.
//!
//! # Usage
//!
//! ```bash
//! # Generate five images and a slideshow
//! reverie generate "a red fox in the snow"
//!
//! # Three images, no video
//! reverie generate "a red fox in the snow" -n 3 --no-slideshow
//!
//! # View configuration
//! reverie config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Reverie - prompt in, images and a slideshow out.
#[derive(Parser, Debug)]
#[command(name = "reverie")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate images from a prompt and assemble a slideshow
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything resolves ${HF_API_TOKEN}
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match reverie_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `reverie config path`."
            );
            reverie_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Reverie v{}", reverie_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
