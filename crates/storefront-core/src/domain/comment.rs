use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Comment on a forum post. Always fetched fresh per post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, alias = "postId", skip_serializing_if = "Option::is_none")]
    pub post_id: Option<ResourceId>,
    pub content: String,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Fill in the owning post when the backend left it out of the body.
    pub fn with_default_post(mut self, post_id: &ResourceId) -> Self {
        if self.post_id.is_none() {
            self.post_id = Some(post_id.clone());
        }
        self
    }
}
