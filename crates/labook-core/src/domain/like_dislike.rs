use serde::{Deserialize, Serialize};

/// One user's vote on one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeDislikeRecord {
    pub user_id: String,
    pub post_id: String,
    pub like: i32,
}
