//! Create `services` table with FK to `clients`.
//!
//! `status` and `health` hold the lower-case enum names.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(pk_auto(Services::Id))
                    .col(string_len(Services::Name, 255).not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    .col(string_len(Services::Status, 32).not_null().default("planning"))
                    .col(string_len(Services::Health, 32).not_null().default("inactive"))
                    .col(integer(Services::ClientId).not_null())
                    .col(timestamp_with_time_zone(Services::CreatedAt).not_null())
                    .col(ColumnDef::new(Services::UpdatedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_client")
                            .from(Services::Table, Services::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    Description,
    Status,
    Health,
    ClientId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Clients { Table, Id }
