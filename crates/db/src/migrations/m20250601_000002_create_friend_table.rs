//! Create friend table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Friend::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Friend::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Friend::User1Id).string_len(32).not_null())
                    .col(ColumnDef::new(Friend::User2Id).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Friend::Accepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Friend::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_user1")
                            .from(Friend::Table, Friend::User1Id)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_user2")
                            .from(Friend::Table, Friend::User2Id)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NOTE: no unique index on (user1_id, user2_id) — duplicate edges for
        // the same pair are permitted by the current contract.

        // Index: user1_id (for listing a user's outgoing edges)
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_user1_id")
                    .table(Friend::Table)
                    .col(Friend::User1Id)
                    .to_owned(),
            )
            .await?;

        // Index: user2_id (for listing a user's incoming edges)
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_user2_id")
                    .table(Friend::Table)
                    .col(Friend::User2Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friend::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Friend {
    Table,
    Id,
    User1Id,
    User2Id,
    Accepted,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
