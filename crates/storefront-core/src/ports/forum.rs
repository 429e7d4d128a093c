//! Community forum port.

use async_trait::async_trait;

use crate::domain::{Comment, LikeState, Post, ResourceId};
use crate::error::ApiError;

/// Backend operations on forum posts and comments.
#[async_trait]
pub trait ForumApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// Create a post. Title and content are expected to be non-empty; this is not checked here.
    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError>;

    /// Like a post. Not idempotent: each call is sent.
    async fn like_post(&self, post_id: &ResourceId) -> Result<LikeState, ApiError>;

    async fn add_comment(&self, post_id: &ResourceId, content: &str)
    -> Result<Comment, ApiError>;

    async fn list_comments(&self, post_id: &ResourceId) -> Result<Vec<Comment>, ApiError>;
}
