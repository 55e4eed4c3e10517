//! Post drafts and the field rules enforced before anything reaches the backend.

use postboard_api_types::{CreatePostRequest, Post, UpdatePostRequest};
use serde::Serialize;

use super::error::DomainError;

pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MAX_CHARS: usize = 1000;

/// Unsaved text for a new post or for an edit of an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftInput {
    pub title: String,
    pub content: String,
}

impl DraftInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self::new(post.title.clone(), post.content.clone())
    }

    pub fn title_remaining(&self) -> usize {
        TITLE_MAX_CHARS.saturating_sub(self.title.chars().count())
    }

    pub fn content_remaining(&self) -> usize {
        CONTENT_MAX_CHARS.saturating_sub(self.content.chars().count())
    }

    pub fn validate(&self) -> Result<ValidatedPost, DomainError> {
        ValidatedPost::new(&self.title, &self.content)
    }
}

/// Title and content that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    title: String,
    content: String,
}

impl ValidatedPost {
    pub fn new(title: &str, content: &str) -> Result<Self, DomainError> {
        let title = ensure_field(title, "title", TITLE_MAX_CHARS)?;
        let content = ensure_field(content, "content", CONTENT_MAX_CHARS)?;
        Ok(Self { title, content })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_create_request(self) -> CreatePostRequest {
        CreatePostRequest {
            title: self.title,
            content: self.content,
        }
    }

    pub fn into_update_request(self) -> UpdatePostRequest {
        UpdatePostRequest {
            title: Some(self.title),
            content: Some(self.content),
        }
    }
}

/// Trim `value` and check it against the non-empty and length rules.
pub fn ensure_field(value: &str, field: &'static str, limit: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::empty(field));
    }
    let length = trimmed.chars().count();
    if length > limit {
        return Err(DomainError::too_long(field, limit, length));
    }
    Ok(trimmed.to_string())
}
