use async_trait::async_trait;

use crate::domain::{LikeDislikeRecord, PostRecord, PostsWithCreators, User};
use crate::error::RepoError;

/// Post persistence. Single-row reads and writes, no business rules.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in storage order, plus the users referenced as creators.
    async fn find_posts_with_creators(&self) -> Result<PostsWithCreators, RepoError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<PostRecord>, RepoError>;

    async fn insert(&self, post: PostRecord) -> Result<(), RepoError>;

    /// Overwrite the row stored under `id`.
    async fn update(&self, id: &str, post: PostRecord) -> Result<(), RepoError>;

    async fn delete(&self, id: &str) -> Result<(), RepoError>;

    /// The vote `user_id` cast on `post_id`, if any.
    async fn find_like_dislike(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> Result<Option<LikeDislikeRecord>, RepoError>;

    async fn insert_like_dislike(&self, record: LikeDislikeRecord) -> Result<(), RepoError>;
}

/// User persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert(&self, user: User) -> Result<(), RepoError>;
}
