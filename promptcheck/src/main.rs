use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    // Initialize tracing with appropriate verbosity
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    // API keys may live in a local .env file
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Extract(args) => {
            info!("Extract command: {:?}", args);
            cli::commands::extract::execute(args)?;
        }
        Commands::Demo(args) => {
            info!("Demo command: {:?}", args);
            cli::commands::demo::execute(args)?;
        }
        Commands::Config(args) => {
            info!("Config command: {:?}", args);
            cli::commands::config::execute(args, cli.config.as_deref())?;
        }
    }

    Ok(())
}
