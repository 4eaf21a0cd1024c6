use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the user who wrote a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub name: String,
}

/// Post in the shape handed back to callers, with its creator nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator: Creator,
}

/// Post row as stored, referencing its creator by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub creator_id: String,
    pub content: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of the joined read: post rows plus the users they reference.
#[derive(Debug, Clone, Default)]
pub struct PostsWithCreators {
    pub posts: Vec<PostRecord>,
    pub creators: Vec<Creator>,
}

impl Post {
    /// Create a fresh post with zeroed counters and both timestamps set to `now`.
    pub fn new(id: String, content: String, creator: Creator, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            likes: 0,
            dislikes: 0,
            created_at: now,
            updated_at: now,
            creator,
        }
    }

    pub fn from_record(record: PostRecord, creator_name: String) -> Self {
        Self {
            creator: Creator {
                id: record.creator_id,
                name: creator_name,
            },
            id: record.id,
            content: record.content,
            likes: record.likes,
            dislikes: record.dislikes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn to_record(&self) -> PostRecord {
        PostRecord {
            id: self.id.clone(),
            creator_id: self.creator.id.clone(),
            content: self.content.clone(),
            likes: self.likes,
            dislikes: self.dislikes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
