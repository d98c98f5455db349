//! Create `activities` table with an optional FK to `services`.
//!
//! Append-only audit trail. Deleting a service keeps its history and
//! clears the reference.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(pk_auto(Activities::Id))
                    .col(string_len(Activities::ActivityType, 32).not_null())
                    .col(ColumnDef::new(Activities::Description).text().null())
                    .col(ColumnDef::new(Activities::ServiceId).integer().null())
                    .col(ColumnDef::new(Activities::UserName).string_len(255).null())
                    .col(timestamp_with_time_zone(Activities::Timestamp).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activities_service")
                            .from(Activities::Table, Activities::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Activities::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Activities { Table, Id, ActivityType, Description, ServiceId, UserName, Timestamp }

#[derive(DeriveIden)]
enum Services { Table, Id }
