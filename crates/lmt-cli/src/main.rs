//! LMT CLI Application

mod cli;
mod commands;
mod output;

use clap::Parser as _;
use cli::{Cli, Commands};

fn init_tracing() -> eyre::Result<()> {
    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Root { tree, out } => commands::root(&tree, out.as_deref()),
        Commands::Prove { tree, element, out } => commands::prove(&tree, element, out.as_deref()),
        Commands::Verify { tree, proof } => commands::verify(&tree, &proof),
        Commands::RangeProve {
            tree,
            start,
            end,
            out,
        } => commands::range_prove(&tree, start, end, out.as_deref()),
        Commands::RangeVerify { tree, proof } => commands::range_verify(&tree, &proof),
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
