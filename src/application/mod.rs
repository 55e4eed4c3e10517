//! Application layer: the post store and the backend seam it talks through.

pub mod backend;
pub mod error;
pub mod store;
