//! Post and user types returned by the Velog listing queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published post as returned by the `Posts` listing query.
///
/// Created by the pagination walker from server responses and read-only
/// afterwards. `id` is the server-assigned opaque identifier that also
/// serves as the pagination cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque server-assigned identifier.
    pub id: String,

    /// Post title.
    pub title: String,

    /// Tags, in the order the server returns them.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Publication timestamp, when the server provides one.
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Creates a post with just an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
            released_at: None,
        }
    }
}

/// Account info from the `User` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelogUser {
    /// Server-assigned user id.
    pub id: String,

    /// Velog username (the `@name` handle).
    pub username: String,

    /// Public profile, when present.
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

/// Public profile fields of a Velog user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name shown on the blog.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Avatar URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
}
