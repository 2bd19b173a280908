//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use veloview_core::{AggregateReport, PostStatEntry, StatOutcome};

/// JSON report for one session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    username: &'a str,
    total_posts: usize,
    total_views: u64,
    average_views: u64,
    success_count: usize,
    no_permission_count: usize,
    failure_count: usize,
    posts: Vec<PostReport<'a>>,
}

/// One ledger entry, flattened for scripting.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostReport<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    released_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Renders the finished ledger and its aggregate as pretty-printed JSON.
pub fn render_json(
    username: &str,
    ledger: &[PostStatEntry],
    report: &AggregateReport,
) -> Result<String> {
    let posts = ledger
        .iter()
        .map(|entry| {
            let (views, error) = match &entry.outcome {
                StatOutcome::Views(n) => (Some(*n), None),
                StatOutcome::NoPermission => (None, Some("NO_PERMISSION")),
                StatOutcome::Failed(message) => (None, Some(message.as_str())),
            };
            PostReport {
                id: &entry.post.id,
                title: &entry.post.title,
                tags: entry.post.tags.iter().map(String::as_str).collect(),
                released_at: entry.post.released_at,
                views,
                error,
            }
        })
        .collect();

    let output = JsonReport {
        username,
        total_posts: report.post_count(),
        total_views: report.total_views,
        average_views: report.average_views,
        success_count: report.success_count,
        no_permission_count: report.no_permission_count,
        failure_count: report.failure_count,
        posts,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use veloview_core::Post;

    #[test]
    fn test_render_json_shape() {
        let ledger = vec![
            PostStatEntry::new(Post::new("p-1", "first"), StatOutcome::Views(120)),
            PostStatEntry::new(Post::new("p-2", "second"), StatOutcome::NoPermission),
            PostStatEntry::new(
                Post::new("p-3", "third"),
                StatOutcome::Failed("timed out".into()),
            ),
        ];
        let report = AggregateReport::from_ledger(&ledger);

        let rendered = render_json("alice", &ledger, &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["username"], "alice");
        assert_eq!(value["totalPosts"], 3);
        assert_eq!(value["totalViews"], 120);
        assert_eq!(value["posts"][0]["views"], 120);
        assert!(value["posts"][0]["error"].is_null());
        assert_eq!(value["posts"][1]["error"], "NO_PERMISSION");
        assert!(value["posts"][1]["views"].is_null());
        assert_eq!(value["posts"][2]["error"], "timed out");
    }
}
