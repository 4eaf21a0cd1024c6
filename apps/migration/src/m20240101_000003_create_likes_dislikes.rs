use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_posts::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LikesDislikes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LikesDislikes::UserId).string().not_null())
                    .col(ColumnDef::new(LikesDislikes::PostId).string().not_null())
                    .col(ColumnDef::new(LikesDislikes::Like).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(LikesDislikes::UserId)
                            .col(LikesDislikes::PostId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_likes_dislikes_user")
                            .from(LikesDislikes::Table, LikesDislikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_likes_dislikes_post")
                            .from(LikesDislikes::Table, LikesDislikes::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LikesDislikes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LikesDislikes {
    Table,
    UserId,
    PostId,
    Like,
}
