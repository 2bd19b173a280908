//! The GraphQL operations consumed by VeloView.
//!
//! Only these three query shapes are ever sent; this is not a general
//! GraphQL client.

use serde_json::{json, Value};

/// Lists a user's posts, one cursor page at a time.
pub const POSTS_QUERY: &str = r"
query Posts($cursor: ID, $username: String, $temp_only: Boolean, $tag: String, $limit: Int) {
  posts(cursor: $cursor, username: $username, temp_only: $temp_only, tag: $tag, limit: $limit) {
    id
    title
    tags
    released_at
    __typename
  }
}
";

/// Fetches the view total for one post.
pub const GET_STATS_QUERY: &str = r"
query GetStats($post_id: ID!) {
  getStats(post_id: $post_id) {
    total
    __typename
  }
}
";

/// Looks up an account by username.
pub const USER_QUERY: &str = r"
query User($username: String!) {
  user(username: $username) {
    id
    username
    profile {
      display_name
      thumbnail
    }
  }
}
";

/// Variables for one `Posts` page request.
pub fn posts_variables(
    username: &str,
    cursor: Option<&str>,
    tag: Option<&str>,
    limit: usize,
) -> Value {
    json!({
        "username": username,
        "cursor": cursor,
        "limit": limit,
        "temp_only": false,
        "tag": tag,
    })
}

/// Variables for one `GetStats` request.
pub fn stats_variables(post_id: &str) -> Value {
    json!({ "post_id": post_id })
}

/// Variables for a `User` lookup.
pub fn user_variables(username: &str) -> Value {
    json!({ "username": username })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_variables_first_page() {
        let vars = posts_variables("alice", None, None, 100);
        assert_eq!(vars["username"], "alice");
        assert!(vars["cursor"].is_null());
        assert!(vars["tag"].is_null());
        assert_eq!(vars["limit"], 100);
        assert_eq!(vars["temp_only"], false);
    }

    #[test]
    fn test_posts_variables_with_cursor_and_tag() {
        let vars = posts_variables("alice", Some("post-99"), Some("rust"), 50);
        assert_eq!(vars["cursor"], "post-99");
        assert_eq!(vars["tag"], "rust");
    }

    #[test]
    fn test_stats_variables() {
        assert_eq!(stats_variables("p-1")["post_id"], "p-1");
    }
}
