//! Post use cases: listing, publishing, editing, deleting and voting.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use super::dto::{
    DeletePostInput, GetPostsInput, InsertPostInput, LikeDislikeInput, PostOutput, UpdatePostInput,
};
use super::{authenticate, is_admin_or_owner};
use crate::domain::{Creator, LikeDislikeRecord, Post, PostRecord, PostsWithCreators};
use crate::error::{PostError, RepoError};
use crate::ports::{IdGenerator, PostRepository, TokenManager, TokenPayload, UserRepository};

/// Value stored in every interaction record, whichever way the vote went.
const INTERACTION_FLAG: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Like,
    Dislike,
}

impl Vote {
    fn parse(like: Option<&Value>) -> Result<Self, PostError> {
        match like.and_then(Value::as_f64) {
            Some(v) if v == 1.0 => Ok(Vote::Like),
            Some(v) if v == 0.0 => Ok(Vote::Dislike),
            _ => Err(PostError::invalid(
                "invalid value; use 1 to like or 0 to dislike",
            )),
        }
    }

    /// Counters written for this vote. They replace the stored ones.
    fn counters(self) -> (i32, i32) {
        match self {
            Vote::Like => (1, 0),
            Vote::Dislike => (0, 1),
        }
    }

    fn message(self) -> &'static str {
        match self {
            Vote::Like => "like registered successfully",
            Vote::Dislike => "dislike registered successfully",
        }
    }
}

fn require_content(content: Option<&Value>) -> Result<String, PostError> {
    match content {
        None | Some(Value::Null) => Err(PostError::invalid("content is required")),
        Some(Value::String(content)) => Ok(content.clone()),
        Some(_) => Err(PostError::invalid("content must be a string")),
    }
}

/// Orchestrates post operations over the injected ports.
pub struct PostBusiness {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    ids: Arc<dyn IdGenerator>,
    tokens: Arc<dyn TokenManager>,
}

impl PostBusiness {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        ids: Arc<dyn IdGenerator>,
        tokens: Arc<dyn TokenManager>,
    ) -> Self {
        Self {
            posts,
            users,
            ids,
            tokens,
        }
    }

    fn authenticate(&self, token: Option<&str>) -> Result<TokenPayload, PostError> {
        authenticate(self.tokens.as_ref(), token)
    }

    /// List every post with its creator, in storage order.
    pub async fn get_posts(&self, input: GetPostsInput) -> Result<Vec<Post>, PostError> {
        let payload = self.authenticate(input.token.as_deref())?;
        tracing::debug!(user_id = %payload.id, q = ?input.q, "Listing posts");

        let PostsWithCreators { posts, creators } = self.posts.find_posts_with_creators().await?;

        let names: HashMap<String, String> = creators
            .into_iter()
            .map(|creator| (creator.id, creator.name))
            .collect();

        posts
            .into_iter()
            .map(|record| -> Result<Post, PostError> {
                let name = names.get(&record.creator_id).cloned().ok_or_else(|| {
                    RepoError::Constraint(format!(
                        "post {} references missing creator {}",
                        record.id, record.creator_id
                    ))
                })?;
                Ok(Post::from_record(record, name))
            })
            .collect()
    }

    /// Publish a new post as the caller.
    pub async fn insert_new_post(
        &self,
        input: InsertPostInput,
    ) -> Result<PostOutput<Post>, PostError> {
        let payload = self.authenticate(input.token.as_deref())?;
        let content = require_content(input.content.as_ref())?;

        let creator = Creator {
            id: payload.id,
            name: payload.name,
        };
        let post = Post::new(self.ids.generate(), content, creator, Utc::now());

        self.posts.insert(post.to_record()).await?;
        tracing::info!(post_id = %post.id, user_id = %post.creator.id, "Post created");

        Ok(PostOutput {
            message: "post published successfully".to_string(),
            post,
        })
    }

    /// Replace a post's content. Admins may edit any post.
    pub async fn update_post(
        &self,
        input: UpdatePostInput,
    ) -> Result<PostOutput<Post>, PostError> {
        let payload = self.authenticate(input.token.as_deref())?;

        let existing = self
            .posts
            .find_by_id(&input.id)
            .await?
            .ok_or_else(|| PostError::invalid("id not found"))?;

        if !is_admin_or_owner(payload.role, &payload.id, &existing.creator_id) {
            return Err(PostError::invalid("not authorized to edit this post"));
        }

        let content = require_content(input.content.as_ref())?;

        // The creator snapshot takes the editor's name, not the author's.
        let post = Post {
            id: input.id,
            content,
            likes: existing.likes,
            dislikes: existing.dislikes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            creator: Creator {
                id: existing.creator_id,
                name: payload.name,
            },
        };

        self.posts.update(&post.id, post.to_record()).await?;
        tracing::info!(post_id = %post.id, user_id = %payload.id, "Post updated");

        Ok(PostOutput {
            message: "post updated successfully".to_string(),
            post,
        })
    }

    /// Delete a post, returning it as it was before removal.
    ///
    /// The permission check looks at the post's owner: it passes when the
    /// owner is an admin or when the owner is the caller.
    pub async fn delete_post(
        &self,
        input: DeletePostInput,
    ) -> Result<PostOutput<Post>, PostError> {
        let payload = self.authenticate(input.token.as_deref())?;

        let existing = self
            .posts
            .find_by_id(&input.id)
            .await?
            .ok_or_else(|| PostError::invalid("post not found"))?;

        let owner = match self.users.find_by_id(&existing.creator_id).await? {
            Some(owner) if is_admin_or_owner(owner.role, &payload.id, &owner.id) => owner,
            Some(_) => return Err(PostError::invalid("not authorized")),
            None => {
                tracing::warn!(
                    post_id = %existing.id,
                    creator_id = %existing.creator_id,
                    "Post owner missing, refusing delete"
                );
                return Err(PostError::invalid("not authorized"));
            }
        };

        self.posts.delete(&input.id).await?;
        tracing::info!(post_id = %input.id, user_id = %payload.id, "Post deleted");

        Ok(PostOutput {
            message: "post deleted successfully".to_string(),
            post: Post::from_record(existing, owner.name),
        })
    }

    /// Record the caller's single like (1) or dislike (0) on a post.
    ///
    /// The post row and the interaction record are written by two separate
    /// calls with no transaction around them.
    pub async fn like_dislike(
        &self,
        input: LikeDislikeInput,
    ) -> Result<PostOutput<PostRecord>, PostError> {
        let payload = self.authenticate(input.token.as_deref())?;

        let existing = self.posts.find_by_id(&input.id).await?;

        if self
            .posts
            .find_like_dislike(&payload.id, &input.id)
            .await?
            .is_some()
        {
            return Err(PostError::invalid(
                "you have already interacted with this post",
            ));
        }

        let existing = existing.ok_or_else(|| PostError::invalid("post not found"))?;
        let vote = Vote::parse(input.like.as_ref())?;
        let (likes, dislikes) = vote.counters();

        let post = Post {
            id: input.id,
            content: existing.content,
            likes,
            dislikes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            creator: Creator {
                id: existing.creator_id,
                name: String::new(),
            },
        };
        let record = post.to_record();

        self.posts.update(&record.id, record.clone()).await?;
        self.posts
            .insert_like_dislike(LikeDislikeRecord {
                user_id: payload.id.clone(),
                post_id: record.id.clone(),
                like: INTERACTION_FLAG,
            })
            .await?;

        tracing::info!(post_id = %record.id, user_id = %payload.id, vote = ?vote, "Vote recorded");

        Ok(PostOutput {
            message: vote.message().to_string(),
            post: record,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::business::test_support::{Harness, admin, invalid_message, user};

    async fn publish(harness: &Harness, token: &str, content: &str) -> Post {
        harness
            .posts
            .insert_new_post(InsertPostInput {
                content: Some(json!(content)),
                token: Some(token.to_string()),
            })
            .await
            .unwrap()
            .post
    }

    #[tokio::test]
    async fn test_every_operation_requires_token() {
        let harness = Harness::new();

        let errors = vec![
            harness
                .posts
                .get_posts(GetPostsInput::default())
                .await
                .unwrap_err(),
            harness
                .posts
                .insert_new_post(InsertPostInput {
                    content: Some(json!("hello")),
                    token: None,
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .update_post(UpdatePostInput {
                    id: "p1".to_string(),
                    content: Some(json!("hello")),
                    token: None,
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .delete_post(DeletePostInput {
                    id: "p1".to_string(),
                    token: None,
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .like_dislike(LikeDislikeInput {
                    id: "p1".to_string(),
                    like: Some(json!(1)),
                    token: None,
                })
                .await
                .unwrap_err(),
        ];

        for err in errors {
            assert_eq!(invalid_message(err), "token not informed");
        }
    }

    #[tokio::test]
    async fn test_every_operation_rejects_undecodable_token() {
        let harness = Harness::new();
        let bad = Some("garbage".to_string());

        let errors = vec![
            harness
                .posts
                .get_posts(GetPostsInput {
                    q: None,
                    token: bad.clone(),
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .insert_new_post(InsertPostInput {
                    content: Some(json!("hello")),
                    token: bad.clone(),
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .update_post(UpdatePostInput {
                    id: "p1".to_string(),
                    content: Some(json!("hello")),
                    token: bad.clone(),
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .delete_post(DeletePostInput {
                    id: "p1".to_string(),
                    token: bad.clone(),
                })
                .await
                .unwrap_err(),
            harness
                .posts
                .like_dislike(LikeDislikeInput {
                    id: "p1".to_string(),
                    like: Some(json!(1)),
                    token: bad,
                })
                .await
                .unwrap_err(),
        ];

        for err in errors {
            assert_eq!(invalid_message(err), "token not valid");
        }
    }

    #[tokio::test]
    async fn test_insert_new_post_builds_fresh_post() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));

        let output = harness
            .posts
            .insert_new_post(InsertPostInput {
                content: Some(json!("hello")),
                token: Some(ann),
            })
            .await
            .unwrap();

        let post = output.post;
        assert_eq!(post.content, "hello");
        assert_eq!(post.likes, 0);
        assert_eq!(post.dislikes, 0);
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(
            post.creator,
            Creator {
                id: "u1".to_string(),
                name: "Ann".to_string()
            }
        );

        let stored = harness.post_repo.get(&post.id).unwrap();
        assert_eq!(stored.creator_id, "u1");
    }

    #[tokio::test]
    async fn test_insert_new_post_validates_content() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));

        let missing = harness
            .posts
            .insert_new_post(InsertPostInput {
                content: None,
                token: Some(ann.clone()),
            })
            .await
            .unwrap_err();
        assert_eq!(invalid_message(missing), "content is required");

        let mistyped = harness
            .posts
            .insert_new_post(InsertPostInput {
                content: Some(json!(42)),
                token: Some(ann),
            })
            .await
            .unwrap_err();
        assert_eq!(invalid_message(mistyped), "content must be a string");
        assert!(harness.post_repo.is_empty());
    }

    #[tokio::test]
    async fn test_get_posts_joins_creators_in_order() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let bob = harness.login(user("u2", "Bob"));

        let first = publish(&harness, &ann, "first").await;
        let second = publish(&harness, &bob, "second").await;

        let posts = harness
            .posts
            .get_posts(GetPostsInput {
                q: Some("ignored".to_string()),
                token: Some(ann),
            })
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, first.id);
        assert_eq!(posts[0].creator.name, "Ann");
        assert_eq!(posts[1].id, second.id);
        assert_eq!(posts[1].creator.name, "Bob");
    }

    #[tokio::test]
    async fn test_get_posts_fails_on_dangling_creator() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        harness.post_repo.seed("p9", "ghost");

        let err = harness
            .posts
            .get_posts(GetPostsInput {
                q: None,
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PostError::Repository(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_post_unknown_id() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));

        let err = harness
            .posts
            .update_post(UpdatePostInput {
                id: "missing".to_string(),
                content: Some(json!("edit")),
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "id not found");
    }

    #[tokio::test]
    async fn test_update_post_rejects_other_normal_user() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let bob = harness.login(user("u2", "Bob"));
        let post = publish(&harness, &ann, "mine").await;

        let err = harness
            .posts
            .update_post(UpdatePostInput {
                id: post.id.clone(),
                content: Some(json!("hijacked")),
                token: Some(bob),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "not authorized to edit this post");
        assert_eq!(harness.post_repo.get(&post.id).unwrap().content, "mine");
    }

    #[tokio::test]
    async fn test_update_post_by_owner_preserves_counters() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let post = publish(&harness, &ann, "draft").await;
        harness.post_repo.set_counters(&post.id, 4, 2);

        let output = harness
            .posts
            .update_post(UpdatePostInput {
                id: post.id.clone(),
                content: Some(json!("final")),
                token: Some(ann),
            })
            .await
            .unwrap();

        assert_eq!(output.post.content, "final");
        assert_eq!(output.post.likes, 4);
        assert_eq!(output.post.dislikes, 2);
        assert_eq!(output.post.created_at, post.created_at);
        assert!(output.post.updated_at >= post.updated_at);

        let stored = harness.post_repo.get(&post.id).unwrap();
        assert_eq!(stored.content, "final");
        assert_eq!(stored.likes, 4);
    }

    #[tokio::test]
    async fn test_admin_update_stamps_editor_name() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let root = harness.login(admin("a1", "Root"));
        let post = publish(&harness, &ann, "draft").await;

        let output = harness
            .posts
            .update_post(UpdatePostInput {
                id: post.id.clone(),
                content: Some(json!("moderated")),
                token: Some(root),
            })
            .await
            .unwrap();

        assert_eq!(output.post.creator.id, "u1");
        assert_eq!(output.post.creator.name, "Root");
    }

    #[tokio::test]
    async fn test_update_post_checks_content_after_authorization() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let post = publish(&harness, &ann, "draft").await;

        let err = harness
            .posts
            .update_post(UpdatePostInput {
                id: post.id,
                content: Some(json!(["not", "text"])),
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "content must be a string");
    }

    #[tokio::test]
    async fn test_delete_post_by_owner_returns_snapshot() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let post = publish(&harness, &ann, "bye").await;

        let output = harness
            .posts
            .delete_post(DeletePostInput {
                id: post.id.clone(),
                token: Some(ann),
            })
            .await
            .unwrap();

        assert_eq!(output.post, post);
        assert!(harness.post_repo.get(&post.id).is_none());
    }

    #[tokio::test]
    async fn test_delete_post_by_stranger_is_refused() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let bob = harness.login(user("u2", "Bob"));
        let post = publish(&harness, &ann, "keep").await;

        let err = harness
            .posts
            .delete_post(DeletePostInput {
                id: post.id.clone(),
                token: Some(bob),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "not authorized");
        assert!(harness.post_repo.get(&post.id).is_some());
    }

    #[tokio::test]
    async fn test_delete_post_owned_by_admin_is_open() {
        let harness = Harness::new();
        let root = harness.login(admin("a1", "Root"));
        let bob = harness.login(user("u2", "Bob"));
        let post = publish(&harness, &root, "announcement").await;

        let output = harness
            .posts
            .delete_post(DeletePostInput {
                id: post.id.clone(),
                token: Some(bob),
            })
            .await
            .unwrap();

        assert_eq!(output.post.creator.name, "Root");
    }

    #[tokio::test]
    async fn test_delete_post_missing_row() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));

        let err = harness
            .posts
            .delete_post(DeletePostInput {
                id: "missing".to_string(),
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "post not found");
    }

    #[tokio::test]
    async fn test_delete_post_with_unknown_owner() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        harness.post_repo.seed("p9", "ghost");

        let err = harness
            .posts
            .delete_post(DeletePostInput {
                id: "p9".to_string(),
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "not authorized");
    }

    #[tokio::test]
    async fn test_like_overwrites_counters_and_records_interaction() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let bob = harness.login(user("u2", "Bob"));
        let post = publish(&harness, &ann, "vote me").await;
        harness.post_repo.set_counters(&post.id, 7, 3);

        let output = harness
            .posts
            .like_dislike(LikeDislikeInput {
                id: post.id.clone(),
                like: Some(json!(1)),
                token: Some(bob),
            })
            .await
            .unwrap();

        assert_eq!(output.message, "like registered successfully");
        assert_eq!(output.post.likes, 1);
        assert_eq!(output.post.dislikes, 0);
        assert_eq!(output.post.creator_id, "u1");

        let stored = harness.post_repo.get(&post.id).unwrap();
        assert_eq!((stored.likes, stored.dislikes), (1, 0));
        assert_eq!(
            harness.post_repo.interaction("u2", &post.id),
            Some(LikeDislikeRecord {
                user_id: "u2".to_string(),
                post_id: post.id.clone(),
                like: 1,
            })
        );
    }

    #[tokio::test]
    async fn test_dislike_still_stores_flag_one() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let post = publish(&harness, &ann, "meh").await;

        let output = harness
            .posts
            .like_dislike(LikeDislikeInput {
                id: post.id.clone(),
                like: Some(json!(0)),
                token: Some(ann),
            })
            .await
            .unwrap();

        assert_eq!(output.message, "dislike registered successfully");
        assert_eq!((output.post.likes, output.post.dislikes), (0, 1));
        assert_eq!(harness.post_repo.interaction("u1", &post.id).unwrap().like, 1);
    }

    #[tokio::test]
    async fn test_second_vote_is_rejected() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let post = publish(&harness, &ann, "once").await;

        let vote = || LikeDislikeInput {
            id: post.id.clone(),
            like: Some(json!(1)),
            token: Some(ann.clone()),
        };

        harness.posts.like_dislike(vote()).await.unwrap();
        let err = harness.posts.like_dislike(vote()).await.unwrap_err();

        assert_eq!(
            invalid_message(err),
            "you have already interacted with this post"
        );
    }

    #[tokio::test]
    async fn test_vote_value_must_be_zero_or_one() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        let post = publish(&harness, &ann, "numbers").await;

        for like in [json!(2), json!(-1), json!("1"), json!(true)] {
            let err = harness
                .posts
                .like_dislike(LikeDislikeInput {
                    id: post.id.clone(),
                    like: Some(like),
                    token: Some(ann.clone()),
                })
                .await
                .unwrap_err();
            assert_eq!(
                invalid_message(err),
                "invalid value; use 1 to like or 0 to dislike"
            );
        }

        let missing = harness
            .posts
            .like_dislike(LikeDislikeInput {
                id: "missing".to_string(),
                like: Some(json!(5)),
                token: Some(ann),
            })
            .await
            .unwrap_err();
        assert!(matches!(missing, PostError::InvalidRequest(_)));
        assert!(harness.post_repo.interaction("u1", &post.id).is_none());
    }

    #[tokio::test]
    async fn test_vote_on_missing_post() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));

        let err = harness
            .posts
            .like_dislike(LikeDislikeInput {
                id: "p1".to_string(),
                like: Some(json!(1)),
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert_eq!(invalid_message(err), "post not found");
    }

    #[tokio::test]
    async fn test_existing_interaction_wins_over_missing_post() {
        let harness = Harness::new();
        let ann = harness.login(user("u1", "Ann"));
        harness.post_repo.record_interaction("u1", "gone");

        let err = harness
            .posts
            .like_dislike(LikeDislikeInput {
                id: "gone".to_string(),
                like: Some(json!(1)),
                token: Some(ann),
            })
            .await
            .unwrap_err();

        assert_eq!(
            invalid_message(err),
            "you have already interacted with this post"
        );
    }

    #[test]
    fn test_vote_parse_accepts_integral_floats() {
        assert_eq!(Vote::parse(Some(&json!(1.0))).unwrap(), Vote::Like);
        assert_eq!(Vote::parse(Some(&json!(0))).unwrap(), Vote::Dislike);
        assert!(Vote::parse(None).is_err());
        assert!(Vote::parse(Some(&json!(0.5))).is_err());
    }
}
