use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use models::activity::{self, ActivityType, NewActivity};
use models::service;
use crate::{actor::Actor, errors::ServiceError, pagination::Page};

/// Append an activity row on `conn`, usually the caller's open transaction.
pub async fn log_activity<C: ConnectionTrait>(
    conn: &C,
    activity_type: ActivityType,
    description: String,
    service_id: Option<i32>,
    actor: &Actor,
) -> Result<activity::Model, ServiceError> {
    let am = activity::ActiveModel {
        activity_type: Set(activity_type),
        description: Set(Some(description)),
        service_id: Set(service_id),
        user_name: Set(Some(actor.name().to_string())),
        timestamp: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(conn).await?)
}

/// Record a non-lifecycle activity such as a maintenance window or an incident.
pub async fn record_activity(
    db: &DatabaseConnection,
    input: NewActivity,
    actor: &Actor,
) -> Result<activity::Model, ServiceError> {
    if input.activity_type.is_lifecycle() {
        return Err(ServiceError::Validation(
            "lifecycle activities are recorded by service mutations".into(),
        ));
    }
    let txn = db.begin().await?;
    if let Some(service_id) = input.service_id {
        if service::Entity::find_by_id(service_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("Service"));
        }
    }
    let am = activity::ActiveModel {
        activity_type: Set(input.activity_type),
        description: Set(input.description),
        service_id: Set(input.service_id),
        user_name: Set(Some(actor.name().to_string())),
        timestamp: Set(Utc::now().into()),
        ..Default::default()
    };
    let created = am.insert(&txn).await?;
    txn.commit().await?;
    info!(id = created.id, activity_type = ?created.activity_type, service_id = ?created.service_id, "recorded activity");
    Ok(created)
}

/// List activities, newest first, optionally for one service.
pub async fn list_activities<C: ConnectionTrait>(
    db: &C,
    service_id: Option<i32>,
    page: Page,
) -> Result<Vec<activity::Model>, ServiceError> {
    let (skip, limit) = page.normalize();
    let mut select = activity::Entity::find();
    if let Some(id) = service_id {
        select = select.filter(activity::Column::ServiceId.eq(id));
    }
    let rows = select
        .order_by_desc(activity::Column::Timestamp)
        .order_by_desc(activity::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_client};
    use crate::service_catalog::create_service;
    use models::service::NewService;

    #[tokio::test]
    async fn filtered_listing_is_newest_first() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_client(&db, "Acme").await?;
        let actor = Actor::system();

        let backup = create_service(&db, NewService { name: "Backup".into(), client_id: c.id, ..NewService::default() }, &actor).await?;
        let email = create_service(&db, NewService { name: "Email".into(), client_id: c.id, ..NewService::default() }, &actor).await?;
        record_activity(&db, NewActivity {
            activity_type: ActivityType::MaintenanceScheduled,
            description: Some("patch window".into()),
            service_id: Some(backup.id),
        }, &actor).await?;
        record_activity(&db, NewActivity {
            activity_type: ActivityType::IncidentReported,
            description: None,
            service_id: Some(backup.id),
        }, &actor).await?;

        let rows = list_activities(&db, Some(backup.id), Page::default()).await?;
        let kinds: Vec<_> = rows.iter().map(|a| a.activity_type).collect();
        assert_eq!(kinds, vec![ActivityType::IncidentReported, ActivityType::MaintenanceScheduled, ActivityType::ServiceCreated]);
        assert!(rows.iter().all(|a| a.service_id == Some(backup.id)));
        assert!(rows.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

        let all = list_activities(&db, None, Page::default()).await?;
        assert_eq!(all.len(), 4);
        assert!(all.iter().any(|a| a.service_id == Some(email.id)));
        Ok(())
    }

    #[tokio::test]
    async fn listing_pages_through_activities() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = seed_client(&db, "Acme").await?;
        let actor = Actor::system();
        for i in 0..3 {
            create_service(&db, NewService { name: format!("svc-{i}"), client_id: c.id, ..NewService::default() }, &actor).await?;
        }

        let first = list_activities(&db, None, Page::new(Some(0), Some(2))).await?;
        let rest = list_activities(&db, None, Page::new(Some(2), Some(2))).await?;
        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 1);
        assert!(first.iter().all(|a| a.id != rest[0].id));
        assert!(list_activities(&db, None, Page::new(Some(10), None)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn record_rejects_lifecycle_types_and_unknown_services() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let actor = Actor::new("alice");

        let lifecycle = record_activity(&db, NewActivity {
            activity_type: ActivityType::ServiceDeleted,
            description: None,
            service_id: None,
        }, &actor).await;
        assert!(matches!(lifecycle, Err(ServiceError::Validation(_))));

        let unknown = record_activity(&db, NewActivity {
            activity_type: ActivityType::SecurityUpdate,
            description: None,
            service_id: Some(42),
        }, &actor).await;
        assert!(matches!(unknown, Err(ServiceError::NotFound(_))));

        let general = record_activity(&db, NewActivity {
            activity_type: ActivityType::UserAdded,
            description: Some("new operator".into()),
            service_id: None,
        }, &actor).await?;
        assert_eq!(general.user_name.as_deref(), Some("alice"));
        assert_eq!(list_activities(&db, None, Page::default()).await?.len(), 1);
        Ok(())
    }
}
