//! HTTP adapter for the `/api/posts/` REST surface.

mod client;

pub use client::HttpBackend;
