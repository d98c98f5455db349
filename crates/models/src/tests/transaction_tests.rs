use crate::db::connect_in_memory;
use crate::client::{self, NewClient};
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};
use anyhow::Result;

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = connect_in_memory().await?;

    let txn = db.begin().await?;
    let created = client::create(&txn, NewClient { name: "tx_commit".into(), ..NewClient::default() }).await?;
    txn.commit().await?;

    let found = client::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|c| c.name), Some("tx_commit".to_string()));
    Ok(())
}

/// Test transaction rollback, explicit and on drop
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = connect_in_memory().await?;

    let txn = db.begin().await?;
    client::create(&txn, NewClient { name: "tx_rollback".into(), ..NewClient::default() }).await?;
    txn.rollback().await?;

    {
        let txn = db.begin().await?;
        client::create(&txn, NewClient { name: "tx_dropped".into(), ..NewClient::default() }).await?;
    }

    assert_eq!(client::Entity::find().count(&db).await?, 0);
    Ok(())
}
