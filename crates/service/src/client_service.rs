use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};
use tracing::info;

use models::client::{self, NewClient};
use crate::{errors::ServiceError, pagination::Page};

/// Create a client. Clients carry no audit trail.
pub async fn create_client(db: &DatabaseConnection, input: NewClient) -> Result<client::Model, ServiceError> {
    let created = client::create(db, input).await?;
    info!(id = created.id, name = %created.name, "created client");
    Ok(created)
}

/// Get client by id.
pub async fn get_client<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<client::Model>, ServiceError> {
    Ok(client::Entity::find_by_id(id).one(db).await?)
}

/// List clients in insertion order.
pub async fn list_clients<C: ConnectionTrait>(db: &C, page: Page) -> Result<Vec<client::Model>, ServiceError> {
    let (skip, limit) = page.normalize();
    let rows = client::Entity::find()
        .order_by_asc(client::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn client_create_get_list() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let acme = create_client(&db, NewClient {
            name: "Acme".into(),
            contact_name: Some("Jo".into()),
            contact_email: Some("jo@acme.test".into()),
            contact_phone: None,
        }).await?;
        let globex = create_client(&db, NewClient { name: "Globex".into(), ..NewClient::default() }).await?;

        let found = get_client(&db, acme.id).await?.expect("client");
        assert_eq!(found.contact_name.as_deref(), Some("Jo"));
        assert!(get_client(&db, 999).await?.is_none());

        let all = list_clients(&db, Page::default()).await?;
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![acme.id, globex.id]);

        let second = list_clients(&db, Page::new(Some(1), Some(1))).await?;
        assert_eq!(second, vec![globex]);
        assert!(list_clients(&db, Page::new(Some(5), None)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn client_create_validates_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_client(&db, NewClient { name: "".into(), ..NewClient::default() }).await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        Ok(())
    }
}
