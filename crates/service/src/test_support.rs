#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::client::{self, NewClient};

/// Fresh, migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn seed_client(db: &DatabaseConnection, name: &str) -> Result<client::Model, anyhow::Error> {
    Ok(client::create(db, NewClient { name: name.to_string(), ..NewClient::default() }).await?)
}
