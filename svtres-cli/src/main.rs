mod cli;

use std::io::Read;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use svtplay_resolver::{ProviderPayload, ResolverConfig, StreamResolver, http};
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::cli::{Args, Commands};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    match args.command {
        Commands::Resolve {
            payload,
            bandwidth,
            bwselect,
        } => {
            let raw = if payload.as_os_str() == "-" {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read payload from stdin")?;
                buffer
            } else {
                std::fs::read_to_string(&payload)
                    .with_context(|| format!("failed to read {}", payload.display()))?
            };

            let payload = ProviderPayload::from_json(&raw)?;
            let config = ResolverConfig::new(bwselect, bandwidth)?;
            let client = http::client_with_timeout(Duration::from_secs(args.timeout));

            let resolver = StreamResolver::new(client, config);
            let result = resolver.resolve(&payload).await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
