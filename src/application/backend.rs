//! The seam between the store and whatever serves `/api/posts/`.

use async_trait::async_trait;
use postboard_api_types::{CreatePostRequest, Post, PostId, UpdatePostRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API Error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

#[async_trait]
pub trait PostsBackend: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError>;

    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, BackendError>;

    async fn update_post(
        &self,
        id: PostId,
        request: UpdatePostRequest,
    ) -> Result<Post, BackendError>;

    async fn delete_post(&self, id: PostId) -> Result<(), BackendError>;
}
