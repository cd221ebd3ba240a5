use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000001_create_users_table::Users;
use crate::m20260115_000002_create_posts_table::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostComments::Table)
                    .if_not_exists()
                    .col(uuid(PostComments::Id).primary_key())
                    .col(uuid(PostComments::UserId))
                    .col(uuid(PostComments::PostId))
                    .col(text(PostComments::Body))
                    .col(timestamp_with_time_zone(PostComments::CreatedAt))
                    .col(timestamp_with_time_zone(PostComments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_comments_user_id")
                            .from(PostComments::Table, PostComments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_comments_post_id")
                            .from(PostComments::Table, PostComments::PostId)
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
            .drop_table(Table::drop().table(PostComments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PostComments {
    Table,
    Id,
    UserId,
    PostId,
    Body,
    CreatedAt,
    UpdatedAt,
}
