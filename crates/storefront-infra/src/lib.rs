//! # Storefront Infrastructure
//!
//! Concrete implementations of the ports defined in `storefront-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory session store only
//! - `http` - reqwest-based backend client
//! - `file-session` - Session persisted to a JSON file under the user config dir

pub mod session;

#[cfg(feature = "http")]
pub mod http;

// Re-exports - Session
pub use session::InMemorySessionStore;

#[cfg(feature = "file-session")]
pub use session::FileSessionStore;

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use http::{ApiClient, HttpClientConfig, HttpForumApi, HttpProductApi};
