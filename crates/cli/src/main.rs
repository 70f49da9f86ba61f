//! AquaData CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a starter config file
//! - `ask`     — One-shot question against the dataset
//! - `chat`    — Interactive question loop
//! - `data`    — Inspect the loaded dataset (regions, preview)
//! - `serve`   — Start the HTTP gateway
//! - `doctor`  — Diagnose config, API key, dataset, and provider

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "aquadata",
    about = "AquaData — water-quality Q&A grounded in CONAGUA monitoring data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration file
    Onboard,

    /// Ask a single question
    Ask {
        /// The question to answer
        question: String,

        /// Restrict the grounding data to one region (estado)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Interactive question loop
    Chat {
        /// Restrict the grounding data to one region (estado)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Inspect the loaded dataset
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Diagnose system health
    Doctor,
}

#[derive(Subcommand)]
enum DataCommands {
    /// List the unique region labels
    Regions,

    /// Print the first rows of the dataset
    Preview {
        /// How many rows to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Restrict to one region
        #[arg(short, long)]
        region: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Ask { question, region } => commands::ask::run(&question, region.as_deref()).await?,
        Commands::Chat { region } => commands::chat::run(region.as_deref()).await?,
        Commands::Data { command } => match command {
            DataCommands::Regions => commands::data::regions().await?,
            DataCommands::Preview {
                limit,
                region,
                json,
            } => commands::data::preview(limit, region.as_deref(), json).await?,
        },
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
