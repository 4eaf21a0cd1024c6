use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use labook_core::domain::{LikeDislikeRecord, PostRecord, PostsWithCreators};
use labook_core::error::RepoError;
use labook_core::ports::PostRepository;

use super::InMemoryUserRepository;

/// Posts in insertion order plus the vote table, joined against an
/// in-memory user store.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<PostRecord>>,
    votes: RwLock<HashMap<(String, String), LikeDislikeRecord>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            votes: RwLock::new(HashMap::new()),
            users,
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_posts_with_creators(&self) -> Result<PostsWithCreators, RepoError> {
        let posts = self.posts.read().await.clone();

        let creator_ids: BTreeSet<&str> = posts.iter().map(|p| p.creator_id.as_str()).collect();
        let creators = self.users.creators(creator_ids).await;

        Ok(PostsWithCreators { posts, creators })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: PostRecord) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("post already exists".to_string()));
        }

        posts.push(post);
        Ok(())
    }

    async fn update(&self, id: &str, post: PostRecord) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        *slot = post;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(RepoError::NotFound);
        }

        // Votes go with the post, like the cascading foreign key in SQL.
        self.votes.write().await.retain(|(_, post_id), _| post_id != id);
        Ok(())
    }

    async fn find_like_dislike(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> Result<Option<LikeDislikeRecord>, RepoError> {
        let votes = self.votes.read().await;
        Ok(votes
            .get(&(user_id.to_string(), post_id.to_string()))
            .cloned())
    }

    async fn insert_like_dislike(&self, record: LikeDislikeRecord) -> Result<(), RepoError> {
        let mut votes = self.votes.write().await;
        let key = (record.user_id.clone(), record.post_id.clone());

        if votes.contains_key(&key) {
            return Err(RepoError::Constraint("vote already recorded".to_string()));
        }

        votes.insert(key, record);
        Ok(())
    }
}
