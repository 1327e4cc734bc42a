//! Create pin table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pin::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pin::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pin::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Pin::WishlistId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Pin::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pin_user")
                            .from(Pin::Table, Pin::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pin_wishlist")
                            .from(Pin::Table, Pin::WishlistId)
                            .to(Wishlist::Table, Wishlist::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NOTE: no unique index on (user_id, wishlist_id) — the same user may
        // pin the same wishlist more than once under the current contract.

        // Index: user_id (for pin listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_pin_user_id")
                    .table(Pin::Table)
                    .col(Pin::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pin::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Pin {
    Table,
    Id,
    UserId,
    WishlistId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Wishlist {
    Table,
    Id,
}
