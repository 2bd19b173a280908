//! Drives one reporting session: credential, listing, stats, rendering.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use url::Url;

use veloview_core::{AggregateReport, CookieHints, Credential};
use veloview_fetch::{
    collect_stats, fetch_user, list_all_posts, HttpTransport, ListOptions, TransportConfig,
    DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE,
};

use crate::output::{render_json, TextFormatter};
use crate::{prompt, Cli, OutputFormat};

/// Environment variable holding the session cookie.
const COOKIE_ENV: &str = "VELOG_COOKIE";

/// Environment variable overriding the GraphQL endpoint.
const ENDPOINT_ENV: &str = "VELOG_GRAPHQL_ENDPOINT";

/// Runs the whole session for one username.
pub async fn run(cli: &Cli, username: &str) -> Result<()> {
    let text_mode = cli.format == OutputFormat::Text;
    let formatter = TextFormatter::new(!cli.no_color && text_mode);
    let interactive = text_mode && !cli.quiet;

    // Credential: flag, environment, or interactive prompt.
    let raw_cookie = match &cli.cookie {
        Some(cookie) => cookie.clone(),
        None => match std::env::var(COOKIE_ENV) {
            Ok(cookie) if !cookie.trim().is_empty() => cookie,
            _ => prompt::read_cookie_interactive(!cli.no_color)?,
        },
    };
    let credential = Credential::from_cookie_input(&raw_cookie)?;

    if interactive {
        let hints = CookieHints::inspect(&raw_cookie);
        eprintln!("{}", formatter.cookie_check(&hints));
        if hints.looks_unauthenticated() {
            warn!("No auth cookies found in the pasted value; requests will likely be refused");
        }
    }

    let transport = build_transport(cli, &credential)?;

    // Advisory account check; the listing is authoritative.
    match fetch_user(&transport, username).await {
        Ok(Some(user)) => {
            let display_name = user
                .profile
                .and_then(|p| p.display_name)
                .unwrap_or_else(|| user.username.clone());
            debug!(username, display = %display_name, "Account found");
        }
        Ok(None) => warn!(username, "Account not found on Velog"),
        Err(e) => warn!(error = %e, "Account lookup failed"),
    }

    // Listing phase: all-or-nothing.
    let options = ListOptions {
        page_size: DEFAULT_PAGE_SIZE,
        tag: cli.tag.clone(),
    };
    let posts = list_all_posts(&transport, username, &options)
        .await
        .context("failed to list posts; the cookie may be expired or incomplete")?;

    if posts.is_empty() {
        println!("No posts found for @{username}.");
        return Ok(());
    }
    if interactive {
        eprintln!("{}", formatter.found_posts(posts.len()));
    }

    // Stats phase: tolerant, sequential, with per-post progress.
    let start = Instant::now();
    let ledger = collect_stats(&transport, &posts, |done, total| {
        if interactive {
            eprint!("\r{}", formatter.progress_line(done, total, start.elapsed()));
            std::io::stderr().flush().ok();
        }
    })
    .await;
    if interactive {
        // Clear the progress line.
        eprint!("\r{}\r", " ".repeat(80));
    }

    let report = AggregateReport::from_ledger(&ledger);
    let elapsed = start.elapsed();

    match cli.format {
        OutputFormat::Json => println!("{}", render_json(username, &ledger, &report)?),
        OutputFormat::Text => {
            println!("{}", formatter.summary(username, &report, elapsed));
            if cli.details {
                println!("{}", formatter.details(&ledger));
            }
        }
    }

    Ok(())
}

/// Resolves endpoint/timeout settings and builds the HTTP transport.
fn build_transport(cli: &Cli, credential: &Credential) -> Result<HttpTransport> {
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var(ENDPOINT_ENV).ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let endpoint = Url::parse(&endpoint)
        .with_context(|| format!("invalid GraphQL endpoint: {endpoint}"))?;

    let config = TransportConfig::new(endpoint)
        .with_timeout(Duration::from_secs(cli.timeout));

    Ok(HttpTransport::new(config, credential)?)
}
