//! Create purchase table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchase::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchase::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Purchase::WishlistItemId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Purchase::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Purchase::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Purchase::PurchaseDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_item")
                            .from(Purchase::Table, Purchase::WishlistItemId)
                            .to(WishlistItem::Table, WishlistItem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_user")
                            .from(Purchase::Table, Purchase::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: wishlist_item_id (for the purchased-quantity aggregate)
        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_item_id")
                    .table(Purchase::Table)
                    .col(Purchase::WishlistItemId)
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for "my purchases")
        manager
            .create_index(
                Index::create()
                    .name("idx_purchase_user_id")
                    .table(Purchase::Table)
                    .col(Purchase::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchase::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Purchase {
    Table,
    Id,
    WishlistItemId,
    UserId,
    Quantity,
    PurchaseDate,
}

#[derive(Iden)]
enum WishlistItem {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
