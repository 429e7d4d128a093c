//! HTTP adapters - reqwest-backed implementations of the backend ports.

mod catalog;
mod client;
mod forum;

pub use catalog::HttpProductApi;
pub use client::{ApiClient, HttpClientConfig, REQUEST_ID_HEADER};
pub use forum::HttpForumApi;
