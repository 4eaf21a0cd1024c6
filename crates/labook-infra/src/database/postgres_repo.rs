//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use labook_core::domain::{Creator, LikeDislikeRecord, PostRecord, PostsWithCreators, User};
use labook_core::error::RepoError;
use labook_core::ports::{PostRepository, UserRepository};

use super::entity::like_dislike::{self, Entity as LikeDislikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_error(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn write_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL post repository, also owning the vote table.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_posts_with_creators(&self) -> Result<PostsWithCreators, RepoError> {
        let posts = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        let mut creator_ids: Vec<String> = posts.iter().map(|p| p.creator_id.clone()).collect();
        creator_ids.sort();
        creator_ids.dedup();

        let creators = if creator_ids.is_empty() {
            Vec::new()
        } else {
            UserEntity::find()
                .filter(user::Column::Id.is_in(creator_ids))
                .all(&self.db)
                .await
                .map_err(query_error)?
        };

        tracing::debug!(
            posts = posts.len(),
            creators = creators.len(),
            "Loaded posts with creators"
        );

        Ok(PostsWithCreators {
            posts: posts.into_iter().map(Into::into).collect(),
            creators: creators.into_iter().map(Creator::from).collect(),
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PostRecord>, RepoError> {
        let result = PostEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: PostRecord) -> Result<(), RepoError> {
        post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn update(&self, id: &str, post: PostRecord) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .set(post::ActiveModel::from(post))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn find_like_dislike(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> Result<Option<LikeDislikeRecord>, RepoError> {
        let result = LikeDislikeEntity::find()
            .filter(like_dislike::Column::UserId.eq(user_id))
            .filter(like_dislike::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn insert_like_dislike(&self, record: LikeDislikeRecord) -> Result<(), RepoError> {
        like_dislike::ActiveModel::from(record)
            .insert(&self.db)
            .await
            .map_err(write_error)?;
        Ok(())
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        UserEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if local.chars().count() > 1 => {
                let first: String = local.chars().take(1).collect();
                format!("{first}***@{domain}")
            }
            Some((_, domain)) => format!("***@{domain}"),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, user: User) -> Result<(), RepoError> {
        user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(write_error)?;
        Ok(())
    }
}
