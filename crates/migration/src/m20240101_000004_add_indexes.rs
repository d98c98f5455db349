use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookups by name
        manager
            .create_index(
                Index::create()
                    .name("idx_clients_name")
                    .table(Clients::Table)
                    .col(Clients::Name)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_services_name")
                    .table(Services::Table)
                    .col(Services::Name)
                    .to_owned(),
            )
            .await?;

        // Services: index on client_id
        manager
            .create_index(
                Index::create()
                    .name("idx_services_client")
                    .table(Services::Table)
                    .col(Services::ClientId)
                    .to_owned(),
            )
            .await?;

        // Activities: index on service_id and timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_activities_service")
                    .table(Activities::Table)
                    .col(Activities::ServiceId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_activities_timestamp")
                    .table(Activities::Table)
                    .col(Activities::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clients_name").table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_name").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_client").table(Services::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activities_service").table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activities_timestamp").table(Activities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients { Table, Name }

#[derive(DeriveIden)]
enum Services { Table, Name, ClientId }

#[derive(DeriveIden)]
enum Activities { Table, ServiceId, Timestamp }
