use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "svtres",
    about = "Resolve playable SVT Play stream and subtitle URLs from provider payloads",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a provider payload into playable URLs
    Resolve {
        /// Path to the payload JSON, or `-` for stdin
        payload: PathBuf,

        /// Bandwidth tier in kbit/s (300, 500, 900, 1600, 2500 or 5000)
        #[arg(short, long)]
        bandwidth: Option<u32>,

        /// Restrict HLS playback to the configured bandwidth bracket
        #[arg(long)]
        bwselect: bool,
    },
}
