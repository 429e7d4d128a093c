//! Community feed: post cards with likes and comment threads.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Comment, LikeState, Post, ResourceId};
use crate::error::ViewError;
use crate::ports::ForumApi;

#[derive(Default)]
struct FeedState {
    posts: Vec<Post>,
    threads: HashMap<ResourceId, Vec<Comment>>,
}

/// Forum posts and their comment threads, as last reported by the backend.
pub struct ForumFeed {
    api: Arc<dyn ForumApi>,
    state: RwLock<FeedState>,
}

impl ForumFeed {
    pub fn new(api: Arc<dyn ForumApi>) -> Self {
        Self {
            api,
            state: RwLock::new(FeedState::default()),
        }
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    /// Comments last fetched for `post_id`.
    pub async fn thread(&self, post_id: &ResourceId) -> Vec<Comment> {
        self.state
            .read()
            .await
            .threads
            .get(post_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the feed with the backend's post list.
    pub async fn load(&self) -> Result<usize, ViewError> {
        let posts = self.api.list_posts().await?;
        let count = posts.len();
        self.state.write().await.posts = posts;
        tracing::debug!(count, "Forum feed loaded");
        Ok(count)
    }

    /// Create a post and put it at the top of the feed.
    pub async fn publish(&self, title: &str, content: &str) -> Result<Post, ViewError> {
        if title.trim().is_empty() {
            return Err(ViewError::Validation("title must not be empty".to_string()));
        }
        if content.trim().is_empty() {
            return Err(ViewError::Validation("content must not be empty".to_string()));
        }

        let post = self.api.create_post(title, content).await?;
        self.state.write().await.posts.insert(0, post.clone());
        tracing::info!(post_id = %post.id, "Post published");
        Ok(post)
    }

    /// Like a post. The local count only changes when the backend reports one.
    pub async fn like(&self, post_id: &ResourceId) -> Result<LikeState, ViewError> {
        let like = self.api.like_post(post_id).await?;
        if let Some(count) = like.like_count {
            let mut state = self.state.write().await;
            if let Some(post) = state.posts.iter_mut().find(|p| &p.id == post_id) {
                post.like_count = count;
            }
        }
        Ok(like)
    }

    /// Add a comment, then reload the thread from the backend.
    pub async fn comment(
        &self,
        post_id: &ResourceId,
        content: &str,
    ) -> Result<Vec<Comment>, ViewError> {
        if content.trim().is_empty() {
            return Err(ViewError::Validation("comment must not be empty".to_string()));
        }
        self.api.add_comment(post_id, content).await?;
        self.comments(post_id).await
    }

    /// Fetch the thread fresh; nothing is diffed against the previous copy.
    pub async fn comments(&self, post_id: &ResourceId) -> Result<Vec<Comment>, ViewError> {
        let comments = self.api.list_comments(post_id).await?;
        self.state
            .write()
            .await
            .threads
            .insert(post_id.clone(), comments.clone());
        Ok(comments)
    }
}
