//! postboard: a client-side store for the posts REST API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::backend::{BackendError, PostsBackend};
pub use application::error::StoreError;
pub use application::store::{PostStore, ViewModel};
pub use infra::http::HttpBackend;
