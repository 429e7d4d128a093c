use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Forum post - as listed on the community page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: ResourceId,
    pub title: String,
    pub content: String,
    #[serde(default, alias = "likes", alias = "likeCount")]
    pub like_count: u64,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Like state reported by the backend after a like request.
///
/// Every field is optional: whether a like toggles or accumulates is the backend's call,
/// and the client only adopts what it is told.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    #[serde(
        default,
        alias = "likes",
        alias = "likeCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
