//! Text output formatting with a progress bar and colors.

use std::time::Duration;

use veloview_core::{AggregateReport, CookieHints, PostStatEntry, StatOutcome};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Width of the progress bar.
const BAR_WIDTH: usize = 30;

/// Longest title shown in the details listing.
const MAX_TITLE_LEN: usize = 50;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the cookie hint check shown after an interactive paste.
    pub fn cookie_check(&self, hints: &CookieHints) -> String {
        let mark = |present: bool| {
            if present {
                self.green("✓")
            } else {
                self.yellow("−")
            }
        };
        let mut lines = vec![self.cyan("Checking cookie...")];
        lines.push(format!("  {} access_token", mark(hints.access_token)));
        lines.push(format!("  {} refresh_token", mark(hints.refresh_token)));
        lines.push(format!("  {} velog", mark(hints.velog)));
        lines.join("\n")
    }

    /// One-line note after the listing phase.
    pub fn found_posts(&self, count: usize) -> String {
        self.green(&format!("Found {count} posts, collecting views..."))
    }

    /// Formats one progress line, redrawn in place after each post.
    pub fn progress_line(&self, done: usize, total: usize, elapsed: Duration) -> String {
        let bar = self.progress_bar(done, total);
        format!(
            "{bar} {}",
            self.dim(&format!("({done}/{total}) {:.1}s", elapsed.as_secs_f64()))
        )
    }

    /// Formats the progress bar itself.
    pub fn progress_bar(&self, done: usize, total: usize) -> String {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (filled, percentage) = if total == 0 {
            (0, 0)
        } else {
            let ratio = done as f64 / total as f64;
            (
                (ratio * BAR_WIDTH as f64).round() as usize,
                (ratio * 100.0).round() as usize,
            )
        };
        let empty = BAR_WIDTH.saturating_sub(filled);

        let bar = format!(
            "[{}{}] {percentage}%",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );
        self.cyan(&bar)
    }

    /// Formats the aggregate summary.
    pub fn summary(
        &self,
        username: &str,
        report: &AggregateReport,
        elapsed: Duration,
    ) -> String {
        let mut lines = Vec::new();

        lines.push(self.cyan(&"═".repeat(55)));
        lines.push(self.bold("View Count Report"));
        lines.push(self.cyan(&"═".repeat(55)));
        lines.push(String::new());

        lines.push(format!("{} @{username}", self.bold("Account:")));
        lines.push(format!("{} {}", self.bold("Posts:"), report.post_count()));
        lines.push(format!(
            "{} {}",
            self.bold("Fetched:"),
            self.green(&report.success_count.to_string())
        ));
        if report.no_permission_count > 0 {
            lines.push(format!(
                "{} {}",
                self.bold("No permission:"),
                self.yellow(&report.no_permission_count.to_string())
            ));
        }
        if report.failure_count > 0 {
            lines.push(format!(
                "{} {}",
                self.bold("Failed:"),
                self.red(&report.failure_count.to_string())
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "  {} {}",
            self.bold("Total views:"),
            self.green(&self.bold(&format_count(report.total_views)))
        ));
        lines.push(format!(
            "  {} {}",
            self.bold("Average views:"),
            self.cyan(&self.bold(&format_count(report.average_views)))
        ));
        lines.push(String::new());
        lines.push(self.dim(&format!("Elapsed: {:.2}s", elapsed.as_secs_f64())));

        if report.no_permission_count > 0 || report.failure_count > 0 {
            lines.push(String::new());
            if report.no_permission_count > 0 {
                lines.push(self.yellow(
                    "Some posts were refused; the cookie may belong to a different account.",
                ));
            }
            if report.failure_count > 0 {
                lines.push(self.yellow(
                    "Some requests failed; re-run with --details to see the errors.",
                ));
            }
        }

        lines.join("\n")
    }

    /// Formats the per-post breakdown: successes ranked by views, then the
    /// refused and failed posts.
    pub fn details(&self, ledger: &[PostStatEntry]) -> String {
        let mut lines = Vec::new();

        lines.push(String::new());
        lines.push(self.cyan(&"═".repeat(55)));
        lines.push(self.bold("Views Per Post"));
        lines.push(self.cyan(&"═".repeat(55)));
        lines.push(String::new());

        let mut ranked: Vec<&PostStatEntry> = ledger
            .iter()
            .filter(|e| e.outcome.is_success())
            .collect();
        ranked.sort_by_key(|e| std::cmp::Reverse(e.outcome.views().unwrap_or(0)));

        for (index, entry) in ranked.iter().enumerate() {
            let views = entry.outcome.views().unwrap_or(0);
            lines.push(format!(
                "  {} {} views  {}",
                self.dim(&format!("{:>3}.", index + 1)),
                self.cyan(&format!("{:>10}", format_count(views))),
                shorten(&entry.post.title)
            ));
        }

        let refused: Vec<&PostStatEntry> = ledger
            .iter()
            .filter(|e| e.outcome == StatOutcome::NoPermission)
            .collect();
        if !refused.is_empty() {
            lines.push(String::new());
            lines.push(self.yellow(&format!("No permission ({} posts):", refused.len())));
            for entry in refused {
                lines.push(format!("  - {}", shorten(&entry.post.title)));
            }
        }

        let failed: Vec<&PostStatEntry> = ledger
            .iter()
            .filter(|e| matches!(e.outcome, StatOutcome::Failed(_)))
            .collect();
        if !failed.is_empty() {
            lines.push(String::new());
            lines.push(self.red(&format!("Failed ({} posts):", failed.len())));
            for entry in failed {
                let message = match &entry.outcome {
                    StatOutcome::Failed(m) => m.as_str(),
                    _ => "",
                };
                lines.push(format!(
                    "  - {} {}",
                    shorten(&entry.post.title),
                    self.dim(message)
                ));
            }
        }

        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        self.wrap(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.wrap(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.wrap(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.wrap(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.wrap(CYAN, text)
    }

    fn wrap(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats a count with thousands separators.
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Clamps a title for one-line display.
fn shorten(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_LEN {
        title.to_string()
    } else {
        let clipped: String = title.chars().take(MAX_TITLE_LEN - 3).collect();
        format!("{clipped}...")
    }
}

// ============================================================================
// Tests
// ============================================================================
