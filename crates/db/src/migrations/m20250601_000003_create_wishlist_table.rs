//! Create wishlist table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wishlist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wishlist::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wishlist::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Wishlist::Title).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Wishlist::Description)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wishlist::SpoilSurprises)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Wishlist::Private)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Wishlist::Address).string_len(256))
                    .col(ColumnDef::new(Wishlist::DateOfEvent).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Wishlist::Pinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Wishlist::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Wishlist::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Wishlist::DeletedBy).string_len(16))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_user")
                            .from(Wishlist::Table, Wishlist::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for owner listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_user_id")
                    .table(Wishlist::Table)
                    .col(Wishlist::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for the recent-wishlists window)
        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_created_at")
                    .table(Wishlist::Table)
                    .col(Wishlist::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wishlist::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Wishlist {
    Table,
    Id,
    UserId,
    Title,
    Description,
    SpoilSurprises,
    Private,
    Address,
    DateOfEvent,
    Pinned,
    CreatedAt,
    DeletedAt,
    DeletedBy,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
