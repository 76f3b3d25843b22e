//! Command-line interface for the graymail spam filter.
//!
//! Commands:
//! - scan: list the mailbox contents without scoring
//! - filter: bucketize every email and assign spam probabilities
//!
//! The mailbox is a directory of `email0.txt`, `email1.txt`, ... files,
//! scanned upward from zero until the first missing index.
//!
//! Configuration via environment:
//! - GRAYMAIL_MAILBOX: mailbox directory (default: emails)
//! - RUST_LOG: log filter for diagnostics

mod commands;
mod mailbox;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{filter::FilterArgs, scan::ScanArgs};

/// Graymail spam filter CLI
///
/// Groups plain-text emails by content similarity and reports per-email
/// spam probabilities. JSON output by default; --human for formatted text.
#[derive(Parser)]
#[command(name = "graymail")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Directory containing email{N}.txt files
    #[arg(
        long,
        env = "GRAYMAIL_MAILBOX",
        default_value = "emails",
        global = true
    )]
    mailbox: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List mailbox contents without scoring
    Scan(ScanArgs),

    /// Bucketize every email and assign spam probabilities
    Filter(FilterArgs),
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::execute(&cli.mailbox, cli.human, args),
        Commands::Filter(args) => commands::filter::execute(&cli.mailbox, cli.human, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
