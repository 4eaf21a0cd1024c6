//! Operation inputs and outputs.
//!
//! `content` and `like` stay as raw JSON values: the services check their
//! type themselves so a missing field and a mistyped one get different errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetPostsInput {
    /// Accepted for compatibility; listing does not filter on it.
    pub q: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsertPostInput {
    pub content: Option<Value>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostInput {
    pub id: String,
    pub content: Option<Value>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeletePostInput {
    pub id: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikeDislikeInput {
    pub id: String,
    pub like: Option<Value>,
    pub token: Option<String>,
}

/// Envelope returned by every post mutation.
#[derive(Debug, Clone, Serialize)]
pub struct PostOutput<T> {
    pub message: String,
    pub post: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthOutput {
    pub message: String,
    pub token: String,
    /// Seconds until `token` expires.
    pub expires_in: i64,
}
