//! Create availability table
//!
//! One row per (room, night), keyed on both columns so a room cannot be
//! listed twice for the same date.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Availability::RoomId).integer().not_null())
                    .col(ColumnDef::new(Availability::RoomType).string().not_null())
                    .col(ColumnDef::new(Availability::AvailableDate).date().not_null())
                    .col(
                        ColumnDef::new(Availability::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .primary_key(
                        Index::create()
                            .col(Availability::RoomId)
                            .col(Availability::AvailableDate),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_type_date")
                    .table(Availability::Table)
                    .col(Availability::RoomType)
                    .col(Availability::AvailableDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Availability {
    Table,
    RoomId,
    RoomType,
    AvailableDate,
    Status,
}
