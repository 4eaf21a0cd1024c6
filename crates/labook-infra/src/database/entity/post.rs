//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use labook_core::domain::PostRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub creator_id: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::like_dislike::Entity")]
    LikeDislike,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::like_dislike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LikeDislike.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PostRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            creator_id: model.creator_id,
            content: model.content,
            likes: model.likes,
            dislikes: model.dislikes,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<PostRecord> for ActiveModel {
    fn from(post: PostRecord) -> Self {
        Self {
            id: Set(post.id),
            creator_id: Set(post.creator_id),
            content: Set(post.content),
            likes: Set(post.likes),
            dislikes: Set(post.dislikes),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
