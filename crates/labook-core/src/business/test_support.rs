//! In-memory fakes of every port, shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::{PostBusiness, UserBusiness};
use crate::domain::{Creator, LikeDislikeRecord, PostRecord, PostsWithCreators, Role, User};
use crate::error::{PostError, RepoError};
use crate::ports::{
    AuthError, IdGenerator, PasswordService, PostRepository, TokenManager, TokenPayload,
    UserRepository,
};

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@labook.test"),
        password_hash: "hashed:secret".to_string(),
        role: Role::Normal,
        created_at: Utc::now(),
    }
}

pub fn admin(id: &str, name: &str) -> User {
    User {
        role: Role::Admin,
        ..user(id, name)
    }
}

/// Message of an `InvalidRequest`; any other error fails the test.
pub fn invalid_message(err: PostError) -> String {
    match err {
        PostError::InvalidRequest(msg) => msg,
        other => panic!("expected InvalidRequest, got {other:?}"),
    }
}

#[derive(Default)]
pub struct FakeTokens {
    issued: Mutex<HashMap<String, TokenPayload>>,
}

impl TokenManager for FakeTokens {
    fn create_token(&self, payload: &TokenPayload) -> Result<String, AuthError> {
        let token = format!("token-{}", payload.id);
        self.issued
            .lock()
            .unwrap()
            .insert(token.clone(), payload.clone());
        Ok(token)
    }

    fn get_payload(&self, token: &str) -> Option<TokenPayload> {
        self.issued.lock().unwrap().get(token).cloned()
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Stores `hashed:<password>`, good enough to exercise verify paths.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

#[derive(Default)]
pub struct FakeUsers {
    users: Mutex<Vec<User>>,
}

impl FakeUsers {
    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<(), RepoError> {
        self.users.lock().unwrap().push(user);
        Ok(())
    }
}

pub struct FakePosts {
    posts: Mutex<Vec<PostRecord>>,
    votes: Mutex<Vec<LikeDislikeRecord>>,
    users: Arc<FakeUsers>,
}

impl FakePosts {
    fn new(users: Arc<FakeUsers>) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            votes: Mutex::new(Vec::new()),
            users,
        }
    }

    pub fn get(&self, id: &str) -> Option<PostRecord> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.lock().unwrap().is_empty()
    }

    /// Insert a row directly, bypassing the service.
    pub fn seed(&self, id: &str, creator_id: &str) {
        let now = Utc::now();
        self.posts.lock().unwrap().push(PostRecord {
            id: id.to_string(),
            creator_id: creator_id.to_string(),
            content: "seeded".to_string(),
            likes: 0,
            dislikes: 0,
            created_at: now,
            updated_at: now,
        });
    }

    pub fn set_counters(&self, id: &str, likes: i32, dislikes: i32) {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == id).unwrap();
        post.likes = likes;
        post.dislikes = dislikes;
    }

    pub fn interaction(&self, user_id: &str, post_id: &str) -> Option<LikeDislikeRecord> {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.user_id == user_id && v.post_id == post_id)
            .cloned()
    }

    pub fn record_interaction(&self, user_id: &str, post_id: &str) {
        self.votes.lock().unwrap().push(LikeDislikeRecord {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            like: 1,
        });
    }
}

#[async_trait]
impl PostRepository for FakePosts {
    async fn find_posts_with_creators(&self) -> Result<PostsWithCreators, RepoError> {
        let posts = self.posts.lock().unwrap().clone();
        let creators = self
            .users
            .all()
            .into_iter()
            .map(|u| Creator {
                id: u.id,
                name: u.name,
            })
            .collect();
        Ok(PostsWithCreators { posts, creators })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.get(id))
    }

    async fn insert(&self, post: PostRecord) -> Result<(), RepoError> {
        self.posts.lock().unwrap().push(post);
        Ok(())
    }

    async fn update(&self, id: &str, post: PostRecord) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        *slot = post;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn find_like_dislike(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> Result<Option<LikeDislikeRecord>, RepoError> {
        Ok(self.interaction(user_id, post_id))
    }

    async fn insert_like_dislike(&self, record: LikeDislikeRecord) -> Result<(), RepoError> {
        self.votes.lock().unwrap().push(record);
        Ok(())
    }
}

/// Both services wired to shared fakes.
pub struct Harness {
    pub posts: PostBusiness,
    pub users: UserBusiness,
    pub post_repo: Arc<FakePosts>,
    pub user_repo: Arc<FakeUsers>,
    pub tokens: Arc<FakeTokens>,
}

impl Harness {
    pub fn new() -> Self {
        let user_repo = Arc::new(FakeUsers::default());
        let post_repo = Arc::new(FakePosts::new(user_repo.clone()));
        let tokens = Arc::new(FakeTokens::default());
        let ids = Arc::new(SequentialIds::default());

        let posts = PostBusiness::new(
            post_repo.clone(),
            user_repo.clone(),
            ids.clone(),
            tokens.clone(),
        );
        let users = UserBusiness::new(
            user_repo.clone(),
            ids,
            tokens.clone(),
            Arc::new(PlainPasswords),
        );

        Self {
            posts,
            users,
            post_repo,
            user_repo,
            tokens,
        }
    }

    /// Register the user and hand back a token for them.
    pub fn login(&self, user: User) -> String {
        let payload = TokenPayload {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        };
        self.user_repo.users.lock().unwrap().push(user);
        self.tokens.create_token(&payload).unwrap()
    }
}
