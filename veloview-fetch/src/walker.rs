//! Cursor-based pagination over the `Posts` listing query.

use serde_json::Value;
use tracing::debug;

use veloview_core::Post;

use crate::error::FetchError;
use crate::queries;
use crate::transport::{GqlReply, Transport};

/// Page size requested from the listing endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Options for one listing run.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Posts requested per page.
    pub page_size: usize,
    /// Restrict the listing to one tag.
    pub tag: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            tag: None,
        }
    }
}

impl ListOptions {
    /// Restricts the listing to one tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Walks the cursor-paginated listing until the server signals end-of-data
/// and returns the complete ordered post list.
///
/// The cursor for each page is the last post id of the previous page. An
/// empty page or a short page (fewer posts than requested) is the success
/// terminal state. Server order is preserved and nothing is de-duplicated;
/// the server cursor is assumed to advance monotonically.
///
/// Any failure aborts the whole listing. A partial post list would silently
/// under-report totals downstream, so there is no partial-result recovery
/// here (contrast with the stats phase, which tolerates per-post failures).
pub async fn list_all_posts(
    transport: &dyn Transport,
    username: &str,
    options: &ListOptions,
) -> Result<Vec<Post>, FetchError> {
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let variables = queries::posts_variables(
            username,
            cursor.as_deref(),
            options.tag.as_deref(),
            options.page_size,
        );

        let reply = transport
            .execute("Posts", queries::POSTS_QUERY, variables)
            .await?;

        let page = match reply {
            GqlReply::Data(data) => parse_posts_page(&data)?,
            GqlReply::Error(err) => {
                return Err(FetchError::Graphql {
                    code: err.code,
                    message: err.message,
                });
            }
        };

        if page.is_empty() {
            break;
        }

        let short_page = page.len() < options.page_size;
        cursor = page.last().map(|p| p.id.clone());
        debug!(
            username,
            fetched = page.len(),
            total = all.len() + page.len(),
            "Fetched listing page"
        );
        all.extend(page);

        if short_page {
            break;
        }
    }

    Ok(all)
}

/// Extracts the posts array from one page's data object.
///
/// A missing or null `posts` field counts as an empty page.
fn parse_posts_page(data: &Value) -> Result<Vec<Post>, FetchError> {
    match data.get("posts") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(posts) => Ok(serde_json::from_value(posts.clone())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_posts_page_missing_is_empty() {
        assert!(parse_posts_page(&json!({})).unwrap().is_empty());
        assert!(parse_posts_page(&json!({ "posts": null })).unwrap().is_empty());
    }

    #[test]
    fn test_parse_posts_page() {
        let data = json!({
            "posts": [
                { "id": "a", "title": "first", "tags": ["rust"] },
                { "id": "b", "title": "second" }
            ]
        });
        let posts = parse_posts_page(&data).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a");
        assert_eq!(posts[1].tags.len(), 0);
    }

    #[test]
    fn test_parse_posts_page_malformed() {
        let data = json!({ "posts": [{ "title": "missing id" }] });
        assert!(parse_posts_page(&data).is_err());
    }
}
