//! Domain layer types and invariants.

pub mod error;
pub mod posts;

pub use postboard_api_types::{Post, PostId};
