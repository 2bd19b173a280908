//! Per-post stats collection and outcome classification.
//!
//! This is the tolerant phase of a session: each post gets exactly one
//! `GetStats` request, every result is classified into a ledger entry, and
//! no individual failure aborts the run.

use serde_json::Value;
use tracing::{debug, warn};

use veloview_core::{Post, PostStatEntry, StatOutcome};

use crate::error::FetchError;
use crate::queries;
use crate::transport::{truncate_message, GqlReply, Transport};

/// Structured code the server uses for permission refusals.
pub const NO_PERMISSION_CODE: &str = "NO_PERMISSION";

/// Message substring that also signals a permission refusal.
///
/// The server does not always populate the structured code field, so the
/// message content is matched as a fallback (case-sensitively). Kept until
/// the code field is confirmed reliable.
pub const NO_PERMISSION_MARKER: &str = "not yours";

/// Fetches stats for each post, strictly sequentially and in listing order,
/// and returns the ledger.
///
/// One outstanding request at a time bounds load on the endpoint and keeps
/// progress deterministic. `on_progress(done, total)` is invoked
/// synchronously after every post, exactly once each, before the next
/// request is issued.
///
/// The returned ledger always has one entry per input post, at the same
/// index. Partial failure is an expected outcome: refusals and errors are
/// recorded, never propagated.
pub async fn collect_stats<F>(
    transport: &dyn Transport,
    posts: &[Post],
    mut on_progress: F,
) -> Vec<PostStatEntry>
where
    F: FnMut(usize, usize),
{
    let total = posts.len();
    let mut ledger = Vec::with_capacity(total);

    for (index, post) in posts.iter().enumerate() {
        let result = transport
            .execute(
                "GetStats",
                queries::GET_STATS_QUERY,
                queries::stats_variables(&post.id),
            )
            .await;

        let outcome = classify(result);
        if let StatOutcome::Failed(message) = &outcome {
            warn!(post_id = %post.id, message = %message, "Stats request failed");
        }

        ledger.push(PostStatEntry::new(post.clone(), outcome));
        on_progress(index + 1, total);
    }

    debug!(total, "Stats collection finished");
    ledger
}

/// Classifies one stats reply into a ledger outcome.
fn classify(result: Result<GqlReply, FetchError>) -> StatOutcome {
    match result {
        Ok(GqlReply::Data(data)) => StatOutcome::Views(views_from_data(&data)),
        Ok(GqlReply::Error(err)) => {
            if err.is_no_permission() {
                StatOutcome::NoPermission
            } else {
                StatOutcome::Failed(truncate_message(&err.message))
            }
        }
        Err(err) => StatOutcome::Failed(truncate_message(&err.to_string())),
    }
}

/// Reads `getStats.total` from a data object.
///
/// A missing or non-numeric total is a legitimate "no stats yet" shape and
/// counts as zero views rather than a failure.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn views_from_data(data: &Value) -> u64 {
    let total = data.get("getStats").and_then(|stats| stats.get("total"));
    match total {
        Some(value) => value
            .as_u64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        None => 0,
    }
}
