//! Forum endpoints under `{base}/forum`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use storefront_core::ApiError;
use storefront_core::domain::{Comment, LikeState, Post, ResourceId};
use storefront_core::ports::ForumApi;
use storefront_shared::Envelope;
use storefront_shared::dto::{AddCommentRequest, CreatePostRequest};

/// [`ForumApi`] over the backend's REST endpoints.
pub struct HttpForumApi {
    client: Arc<super::ApiClient>,
}

impl HttpForumApi {
    pub fn new(client: Arc<super::ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ForumApi for HttpForumApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let builder = self.client.prepare(Method::GET, &["forum", "posts"]).await;
        self.client
            .send_json::<Envelope<Vec<Post>>>("fetching posts", builder)
            .await
            .map(Envelope::into_inner)
    }

    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError> {
        let body = CreatePostRequest {
            title: title.to_string(),
            content: content.to_string(),
        };
        let builder = self
            .client
            .prepare(Method::POST, &["forum", "posts", "create"])
            .await
            .map(|b| b.json(&body));
        self.client
            .send_json::<Envelope<Post>>("creating post", builder)
            .await
            .map(Envelope::into_inner)
    }

    async fn like_post(&self, post_id: &ResourceId) -> Result<LikeState, ApiError> {
        let builder = self
            .client
            .prepare(Method::POST, &["forum", "posts", post_id.as_str(), "like"])
            .await;
        self.client
            .send_json_or_default::<LikeEnvelope>("liking post", builder)
            .await
            .map(LikeEnvelope::into_inner)
    }

    async fn add_comment(&self, post_id: &ResourceId, content: &str) -> Result<Comment, ApiError> {
        let body = AddCommentRequest {
            content: content.to_string(),
        };
        let builder = self
            .client
            .prepare(Method::POST, &["forum", "posts", post_id.as_str(), "comments"])
            .await
            .map(|b| b.json(&body));
        self.client
            .send_json::<Envelope<Comment>>("adding comment", builder)
            .await
            .map(|c| c.into_inner().with_default_post(post_id))
    }

    async fn list_comments(&self, post_id: &ResourceId) -> Result<Vec<Comment>, ApiError> {
        let builder = self
            .client
            .prepare(Method::GET, &["forum", "posts", post_id.as_str(), "comments"])
            .await;
        let comments = self
            .client
            .send_json::<Envelope<Vec<Comment>>>("fetching comments", builder)
            .await?
            .into_inner();
        Ok(comments
            .into_iter()
            .map(|c| c.with_default_post(post_id))
            .collect())
    }
}

/// Like responses may be empty, so the envelope itself needs a default.
#[derive(serde::Deserialize)]
#[serde(transparent)]
struct LikeEnvelope(Envelope<LikeState>);

impl Default for LikeEnvelope {
    fn default() -> Self {
        Self(Envelope::Bare(LikeState::default()))
    }
}

impl LikeEnvelope {
    fn into_inner(self) -> LikeState {
        self.0.into_inner()
    }
}
