//! Upright CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use upright_cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            upright_cli::run::execute(&args)?;
        }
        Commands::Version => {
            println!("upright {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
