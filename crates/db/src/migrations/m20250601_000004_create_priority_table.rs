//! Create priority table migration.
//!
//! Also seeds the global priority levels — the table is an enum-like lookup
//! with no per-user scoping.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEED_PRIORITIES: [(&str, &str); 4] = [
    ("priority_low", "Low"),
    ("priority_medium", "Medium"),
    ("priority_high", "High"),
    ("priority_must_have", "Must Have"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Priority::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Priority::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Priority::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        for (id, name) in SEED_PRIORITIES {
            let insert = Query::insert()
                .into_table(Priority::Table)
                .columns([Priority::Id, Priority::Name])
                .values_panic([id.into(), name.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Priority::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Priority {
    Table,
    Id,
    Name,
}
