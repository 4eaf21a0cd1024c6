//! Data Transfer Objects - request bodies for the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of post creation and edition.
///
/// `content` is left untyped so the server can tell a missing value from a
/// non-string one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostContentRequest {
    #[serde(default)]
    pub content: Option<Value>,
}

/// Body of a vote: `1` likes, `0` dislikes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LikeDislikeRequest {
    #[serde(default)]
    pub like: Option<Value>,
}

/// Query string of the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub q: Option<String>,
}
