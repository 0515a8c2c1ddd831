mod cli;
mod completion;
mod config;
mod listing;
mod logging;
mod workflow;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wikigen")]
#[command(about = "Generate a markdown wiki for a codebase with an LLM")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress output
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the wiki for a codebase
    Run {
        /// Path to the codebase to document
        codebase_path: PathBuf,

        /// Output directory for the generated wiki
        #[arg(long, default_value = "wiki")]
        wiki_dir: PathBuf,
    },

    /// List the registered steps and their output files
    Steps,

    /// Show resolved configuration without calling the endpoint
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.debug, cli.quiet);

    // A local .env file counts as environment for credential lookup.
    let _ = dotenvy::dotenv();

    let config = config::WikigenConfig::load(None)?;
    let handler = cli::create_handler(cli.quiet);

    let code = match cli.command {
        Commands::Run {
            codebase_path,
            wiki_dir,
        } => cli::generate_wiki(&codebase_path, &wiki_dir, &config, &*handler).await,

        Commands::Steps => {
            cli::list_steps(&*handler);
            0
        }

        Commands::Doctor => cli::doctor(&config, &*handler),
    };

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
