//! Interactive cookie prompt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Prints the cookie-copying guide and reads one line from stdin.
pub fn read_cookie_interactive(use_colors: bool) -> Result<String> {
    let bold = if use_colors { "\x1b[1m" } else { "" };
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let cyan = if use_colors { "\x1b[36m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    eprintln!();
    eprintln!("{cyan}{}{reset}", "═".repeat(55));
    eprintln!("{bold}How to copy your Velog session cookie{reset}");
    eprintln!("{cyan}{}{reset}", "═".repeat(55));
    eprintln!();
    eprintln!("  {dim}1.{reset} Open devtools (F12) on velog.io while logged in");
    eprintln!("  {dim}2.{reset} Network tab, filter for 'graphql', reload the page");
    eprintln!("  {dim}3.{reset} Click a graphql request, open Request Headers");
    eprintln!("  {dim}4.{reset} Copy the {bold}whole{reset} value of the 'cookie:' header");
    eprintln!();
    eprintln!("  {dim}A leading 'cookie:' prefix is stripped automatically.{reset}");
    eprintln!();
    eprint!("{cyan}{bold}Paste the cookie string: {reset}");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read cookie from stdin")?;
    eprintln!();

    Ok(line.trim().to_string())
}
