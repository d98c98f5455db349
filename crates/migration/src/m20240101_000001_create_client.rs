//! Create `clients` table.
//! Customers owning zero or more managed services.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(pk_auto(Clients::Id))
                    .col(string_len(Clients::Name, 255).not_null())
                    .col(ColumnDef::new(Clients::ContactName).string_len(255).null())
                    .col(ColumnDef::new(Clients::ContactEmail).string_len(255).null())
                    .col(ColumnDef::new(Clients::ContactPhone).string_len(64).null())
                    .col(timestamp_with_time_zone(Clients::CreatedAt).not_null())
                    .col(ColumnDef::new(Clients::UpdatedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clients::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Name,
    ContactName,
    ContactEmail,
    ContactPhone,
    CreatedAt,
    UpdatedAt,
}
