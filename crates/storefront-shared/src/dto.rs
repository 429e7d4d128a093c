//! Data Transfer Objects - request bodies and query strings sent to the backend.

use serde::{Deserialize, Serialize};

/// Body of `POST /forum/posts/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Body of `POST /forum/posts/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

/// Query string of `GET /product/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
}
