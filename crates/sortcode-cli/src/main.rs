//! `sortcode` command-line entrypoint.
//!
//! - `sortcode encode` - bytes to text
//! - `sortcode decode` - text to bytes
//! - `sortcode pace` - watch a throttle hand out grants

#![forbid(unsafe_code)]

mod codec;
mod pace;

use clap::{Parser, Subcommand};

/// Order-preserving binary-to-text codecs and thread throttles.
#[derive(Parser)]
#[command(name = "sortcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode raw bytes as text.
    ///
    /// Reads INPUT (or stdin) and prints the encoding followed by a newline.
    Encode(codec::EncodeArgs),

    /// Decode text back to raw bytes.
    ///
    /// Reads TEXT (or stdin, trailing whitespace trimmed) and writes the bytes to stdout.
    Decode(codec::DecodeArgs),

    /// Acquire tokens from a throttle and report when each was granted.
    Pace(pace::PaceArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => codec::run_encode(&args),
        Commands::Decode(args) => codec::run_decode(&args),
        Commands::Pace(args) => pace::run(&args),
    }
}
