// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! VeloView CLI - total Velog view counts from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Sum views for an account (prompts for the session cookie)
//! veloview myusername
//!
//! # Per-post breakdown
//! veloview myusername --details
//!
//! # Restrict to one tag
//! veloview myusername --tag rust
//!
//! # JSON output for scripting, cookie from the environment
//! VELOG_COOKIE="access_token=..." veloview myusername --format json
//! ```

mod output;
mod prompt;
mod run;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// VeloView CLI - total Velog view counts.
#[derive(Parser)]
#[command(name = "veloview")]
#[command(about = "Sums view counts across all posts of a Velog account")]
#[command(long_about = r"
VeloView walks a Velog account's post listing, fetches the view total of
every post, and reports the sum, the average, and a per-post ledger.

The session cookie is read from --cookie, the VELOG_COOKIE environment
variable, or an interactive prompt. Copy it from the 'cookie:' request
header of any graphql call in your browser's devtools network tab while
logged in to velog.io.

Examples:
  veloview myusername                # summary
  veloview myusername --details      # per-post breakdown
  veloview myusername --format json  # machine-readable report
")]
#[command(version)]
#[command(author = "VeloView Contributors")]
pub struct Cli {
    /// Velog username to report on.
    pub username: Option<String>,

    /// Show the per-post breakdown (sorted by views).
    #[arg(long, short = 'd')]
    pub details: bool,

    /// Restrict the listing to one tag.
    #[arg(long)]
    pub tag: Option<String>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Session cookie (overrides VELOG_COOKIE and the interactive prompt).
    #[arg(long)]
    pub cookie: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// GraphQL endpoint override (also VELOG_GRAPHQL_ENDPOINT).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (summary only, no progress or hints).
    #[arg(long, short)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success (including an account with zero posts).
    Success = 0,
    /// Missing username, invalid credential, or listing failure.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("veloview=debug,info")
    } else {
        EnvFilter::new("veloview=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let Some(username) = cli.username.clone() else {
        eprintln!("Usage: veloview <username> [--details] [--format json]");
        eprintln!("Try 'veloview --help' for the full option list.");
        std::process::exit(ExitCode::Error as i32);
    };

    if let Err(e) = run::run(&cli, &username).await {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
