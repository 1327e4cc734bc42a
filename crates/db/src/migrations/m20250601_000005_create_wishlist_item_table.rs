//! Create wishlist item table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishlistItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WishlistItem::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WishlistItem::WishlistId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WishlistItem::Name).string_len(256).not_null())
                    .col(ColumnDef::new(WishlistItem::Note).string_len(256))
                    .col(ColumnDef::new(WishlistItem::WebsiteUrl).string_len(1024))
                    .col(
                        ColumnDef::new(WishlistItem::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(WishlistItem::PriorityId).string_len(32))
                    .col(
                        ColumnDef::new(WishlistItem::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(WishlistItem::DeletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(WishlistItem::DeletedBy).string_len(16))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_item_wishlist")
                            .from(WishlistItem::Table, WishlistItem::WishlistId)
                            .to(Wishlist::Table, Wishlist::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_item_priority")
                            .from(WishlistItem::Table, WishlistItem::PriorityId)
                            .to(Priority::Table, Priority::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: wishlist_id (for item listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_item_wishlist_id")
                    .table(WishlistItem::Table)
                    .col(WishlistItem::WishlistId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishlistItem::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WishlistItem {
    Table,
    Id,
    WishlistId,
    Name,
    Note,
    WebsiteUrl,
    Quantity,
    PriorityId,
    CreatedAt,
    DeletedAt,
    DeletedBy,
}

#[derive(Iden)]
enum Wishlist {
    Table,
    Id,
}

#[derive(Iden)]
enum Priority {
    Table,
    Id,
}
