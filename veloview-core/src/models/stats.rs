//! Per-post stat outcomes and the aggregate report.

use serde::{Deserialize, Serialize};

use super::post::Post;

/// The classified result of one stats request.
///
/// Exactly one variant holds per post. `NoPermission` and `Failed` are
/// normal, expected outcomes of a collection run, not exceptional paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatOutcome {
    /// The server returned a view total.
    Views(u64),
    /// The server refused the stats request for this post.
    NoPermission,
    /// The request failed some other way; the message is bounded.
    Failed(String),
}

impl StatOutcome {
    /// Returns the view count for a successful outcome.
    pub fn views(&self) -> Option<u64> {
        match self {
            Self::Views(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Views(_))
    }
}

/// One ledger record: a post paired with its stats outcome.
///
/// The ledger is ordered; index `i` always corresponds to the `i`-th post
/// of the listing that was fed to the collector. Entries are never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostStatEntry {
    /// The post this entry describes.
    pub post: Post,
    /// The classified outcome of its stats request.
    pub outcome: StatOutcome,
}

impl PostStatEntry {
    /// Creates a ledger entry.
    pub fn new(post: Post, outcome: StatOutcome) -> Self {
        Self { post, outcome }
    }
}

/// Totals folded from a finished ledger.
///
/// Always recomputed from the ledger via [`AggregateReport::from_ledger`];
/// there are no running counters that could drift from the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Sum of views over successful entries.
    pub total_views: u64,
    /// Entries with a view total.
    pub success_count: usize,
    /// Entries the server refused.
    pub no_permission_count: usize,
    /// Entries that failed some other way.
    pub failure_count: usize,
    /// `total_views / success_count`, rounded; 0 when nothing succeeded.
    pub average_views: u64,
}

impl AggregateReport {
    /// Folds a finished ledger into totals.
    pub fn from_ledger(ledger: &[PostStatEntry]) -> Self {
        let mut report = Self::default();
        for entry in ledger {
            match &entry.outcome {
                StatOutcome::Views(n) => {
                    report.total_views += n;
                    report.success_count += 1;
                }
                StatOutcome::NoPermission => report.no_permission_count += 1,
                StatOutcome::Failed(_) => report.failure_count += 1,
            }
        }
        if report.success_count > 0 {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                report.average_views = (report.total_views as f64
                    / report.success_count as f64)
                    .round() as u64;
            }
        }
        report
    }

    /// Total number of ledger entries this report covers.
    pub fn post_count(&self) -> usize {
        self.success_count + self.no_permission_count + self.failure_count
    }
}
