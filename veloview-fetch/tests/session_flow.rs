//! Walker and collector behavior over a scripted transport.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use veloview_core::{AggregateReport, Post, StatOutcome};
use veloview_fetch::{
    collect_stats, fetch_user, list_all_posts, FetchError, GqlReply, GraphqlError, ListOptions,
    Transport,
};

/// Transport that replays a scripted sequence of replies and records every
/// call it receives.
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<GqlReply, FetchError>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Result<GqlReply, FetchError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        operation: &str,
        _query: &str,
        variables: Value,
    ) -> Result<GqlReply, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), variables));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted")
    }
}

/// Builds a listing page reply of `count` posts with ids `post-<start>`...
fn posts_page(start: usize, count: usize) -> Result<GqlReply, FetchError> {
    let posts: Vec<Value> = (start..start + count)
        .map(|n| json!({ "id": format!("post-{n}"), "title": format!("Title {n}") }))
        .collect();
    Ok(GqlReply::Data(json!({ "posts": posts })))
}

fn stats_reply(total: u64) -> Result<GqlReply, FetchError> {
    Ok(GqlReply::Data(json!({ "getStats": { "total": total } })))
}

fn graphql_error(code: Option<&str>, message: &str) -> Result<GqlReply, FetchError> {
    Ok(GqlReply::Error(GraphqlError {
        code: code.map(String::from),
        message: message.to_string(),
    }))
}

// ============================================================================
// Walker
// ============================================================================

#[tokio::test]
async fn walker_collects_all_pages() {
    let transport = ScriptedTransport::new(vec![
        posts_page(0, 100),
        posts_page(100, 100),
        posts_page(200, 37),
    ]);

    let posts = list_all_posts(&transport, "alice", &ListOptions::default())
        .await
        .unwrap();

    assert_eq!(posts.len(), 237);
    assert_eq!(posts[0].id, "post-0");
    assert_eq!(posts[236].id, "post-236");

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    for (operation, _) in &calls {
        assert_eq!(operation, "Posts");
    }

    // Cursor advances to the last id of the prior page.
    assert!(calls[0].1["cursor"].is_null());
    assert_eq!(calls[1].1["cursor"], "post-99");
    assert_eq!(calls[2].1["cursor"], "post-199");

    // Fixed listing variables on every call.
    assert_eq!(calls[0].1["username"], "alice");
    assert_eq!(calls[0].1["limit"], 100);
    assert_eq!(calls[0].1["temp_only"], false);
    assert!(calls[0].1["tag"].is_null());
}

#[tokio::test]
async fn walker_empty_first_page() {
    let transport = ScriptedTransport::new(vec![posts_page(0, 0)]);

    let posts = list_all_posts(&transport, "alice", &ListOptions::default())
        .await
        .unwrap();

    assert!(posts.is_empty());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn walker_stops_on_short_page() {
    let transport = ScriptedTransport::new(vec![posts_page(0, 37)]);

    let posts = list_all_posts(&transport, "alice", &ListOptions::default())
        .await
        .unwrap();

    assert_eq!(posts.len(), 37);
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn walker_failure_discards_listing() {
    let transport = ScriptedTransport::new(vec![
        posts_page(0, 100),
        Err(FetchError::Status {
            status: 502,
            body: "bad gateway".into(),
        }),
    ]);

    let result = list_all_posts(&transport, "alice", &ListOptions::default()).await;

    // A failure mid-pagination is fatal; no partial 100 surfaces.
    assert!(matches!(
        result,
        Err(FetchError::Status { status: 502, .. })
    ));
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn walker_graphql_error_is_fatal() {
    let transport =
        ScriptedTransport::new(vec![graphql_error(None, "invalid token")]);

    let result = list_all_posts(&transport, "alice", &ListOptions::default()).await;

    match result {
        Err(FetchError::Graphql { message, .. }) => assert_eq!(message, "invalid token"),
        other => panic!("expected GraphQL error, got {other:?}"),
    }
}

#[tokio::test]
async fn walker_passes_tag_filter() {
    let transport = ScriptedTransport::new(vec![posts_page(0, 2)]);
    let options = ListOptions::default().with_tag("rust");

    list_all_posts(&transport, "alice", &options).await.unwrap();

    assert_eq!(transport.calls()[0].1["tag"], "rust");
}

// ============================================================================
// Collector
// ============================================================================

fn five_posts() -> Vec<Post> {
    (1..=5)
        .map(|n| Post::new(format!("p-{n}"), format!("Post {n}")))
        .collect()
}

#[tokio::test]
async fn collector_tolerates_partial_failure() {
    let transport = ScriptedTransport::new(vec![
        stats_reply(120),
        graphql_error(Some("NO_PERMISSION"), "This post is not yours"),
        stats_reply(0),
        Err(FetchError::Timeout(30)),
        stats_reply(45),
    ]);
    let posts = five_posts();

    let ledger = collect_stats(&transport, &posts, |_, _| {}).await;

    assert_eq!(ledger.len(), 5);
    for (entry, post) in ledger.iter().zip(&posts) {
        assert_eq!(entry.post.id, post.id);
    }
    assert_eq!(ledger[0].outcome, StatOutcome::Views(120));
    assert_eq!(ledger[1].outcome, StatOutcome::NoPermission);
    assert_eq!(ledger[2].outcome, StatOutcome::Views(0));
    assert!(matches!(ledger[3].outcome, StatOutcome::Failed(_)));
    assert_eq!(ledger[4].outcome, StatOutcome::Views(45));

    let report = AggregateReport::from_ledger(&ledger);
    assert_eq!(report.total_views, 165);
    assert_eq!(report.success_count, 3);
    assert_eq!(report.no_permission_count, 1);
    assert_eq!(report.failure_count, 1);
    assert_eq!(report.average_views, 55);

    // One GetStats call per post.
    let calls = transport.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[0].1["post_id"], "p-1");
    assert_eq!(calls[4].1["post_id"], "p-5");
}

#[tokio::test]
async fn collector_reports_progress_per_post() {
    let transport = ScriptedTransport::new(vec![
        stats_reply(120),
        graphql_error(Some("NO_PERMISSION"), "This post is not yours"),
        stats_reply(0),
        Err(FetchError::Timeout(30)),
        stats_reply(45),
    ]);
    let posts = five_posts();

    let mut progress = Vec::new();
    collect_stats(&transport, &posts, |done, total| {
        progress.push((done, total));
    })
    .await;

    assert_eq!(progress, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
}

#[tokio::test]
async fn collector_no_permission_by_message_alone() {
    let transport =
        ScriptedTransport::new(vec![graphql_error(None, "This post is not yours")]);
    let posts = vec![Post::new("p-1", "Post 1")];

    let ledger = collect_stats(&transport, &posts, |_, _| {}).await;

    assert_eq!(ledger[0].outcome, StatOutcome::NoPermission);
}

#[tokio::test]
async fn collector_empty_input() {
    let transport = ScriptedTransport::new(vec![]);

    let mut called = false;
    let ledger = collect_stats(&transport, &[], |_, _| called = true).await;

    assert!(ledger.is_empty());
    assert!(!called);
    assert!(transport.calls().is_empty());
}

// ============================================================================
// User lookup
// ============================================================================

#[tokio::test]
async fn user_lookup_found() {
    let transport = ScriptedTransport::new(vec![Ok(GqlReply::Data(json!({
        "user": {
            "id": "u-1",
            "username": "alice",
            "profile": { "display_name": "Alice", "thumbnail": null }
        }
    })))]);

    let user = fetch_user(&transport, "alice").await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn user_lookup_missing() {
    let transport =
        ScriptedTransport::new(vec![Ok(GqlReply::Data(json!({ "user": null })))]);

    assert!(fetch_user(&transport, "nobody").await.unwrap().is_none());
}
