//! Wire types shared by the postboard client and anything that speaks the
//! `/api/posts/` REST surface.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Server-assigned identifier of a post.
pub type PostId = i64;

/// A post as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Body of `PUT /api/posts/{id}/`. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
