//! Managed service persistence.
//!
//! Every mutation runs in one transaction together with its audit activity,
//! so a logged lifecycle event always matches a durable service state.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};

use models::activity::ActivityType;
use models::client;
use models::service::{self, NewService, ServicePatch};
use models::validation::validate_name;
use crate::{activity_service::log_activity, actor::Actor, errors::ServiceError, pagination::Page};

async fn ensure_client<C: ConnectionTrait>(conn: &C, client_id: i32) -> Result<(), ServiceError> {
    match client::Entity::find_by_id(client_id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found("Client")),
    }
}

/// Get service by id.
pub async fn get_service<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<service::Model>, ServiceError> {
    Ok(service::Entity::find_by_id(id).one(db).await?)
}

/// List services in insertion order.
pub async fn list_services<C: ConnectionTrait>(db: &C, page: Page) -> Result<Vec<service::Model>, ServiceError> {
    let (skip, limit) = page.normalize();
    let rows = service::Entity::find()
        .order_by_asc(service::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

/// List the services owned by one client.
pub async fn list_services_for_client<C: ConnectionTrait>(
    db: &C,
    client_id: i32,
    page: Page,
) -> Result<Vec<service::Model>, ServiceError> {
    let (skip, limit) = page.normalize();
    let rows = service::Entity::find()
        .filter(service::Column::ClientId.eq(client_id))
        .order_by_asc(service::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

/// Create a service and its `service_created` activity.
#[instrument(skip(db, input, actor), fields(client_id = input.client_id, actor = actor.name()))]
pub async fn create_service(
    db: &DatabaseConnection,
    input: NewService,
    actor: &Actor,
) -> Result<service::Model, ServiceError> {
    validate_name(&input.name)?;

    let txn = db.begin().await?;
    ensure_client(&txn, input.client_id).await?;
    let am = service::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        status: Set(input.status),
        health: Set(input.health),
        client_id: Set(input.client_id),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        ..Default::default()
    };
    let created = am.insert(&txn).await?;
    log_activity(
        &txn,
        ActivityType::ServiceCreated,
        format!("Service '{}' was created", created.name),
        Some(created.id),
        actor,
    )
    .await?;
    txn.commit().await?;

    info!(id = created.id, name = %created.name, "created service");
    Ok(created)
}

/// Apply a partial update. Returns `None` without side effects when the id is unknown.
#[instrument(skip(db, patch, actor), fields(actor = actor.name()))]
pub async fn update_service(
    db: &DatabaseConnection,
    id: i32,
    patch: ServicePatch,
    actor: &Actor,
) -> Result<Option<service::Model>, ServiceError> {
    if let Some(name) = patch.name.as_deref() {
        validate_name(name)?;
    }

    let txn = db.begin().await?;
    let Some(found) = service::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(None);
    };

    let mut am: service::ActiveModel = found.into();
    if let Some(name) = patch.name { am.name = Set(name); }
    if let Some(description) = patch.description { am.description = Set(description); }
    if let Some(status) = patch.status { am.status = Set(status); }
    if let Some(health) = patch.health { am.health = Set(health); }
    if let Some(client_id) = patch.client_id {
        ensure_client(&txn, client_id).await?;
        am.client_id = Set(client_id);
    }
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(&txn).await?;

    log_activity(
        &txn,
        ActivityType::ServiceUpdated,
        format!("Service '{}' was updated", updated.name),
        Some(updated.id),
        actor,
    )
    .await?;
    txn.commit().await?;

    info!(id = updated.id, "updated service");
    Ok(Some(updated))
}

/// Delete a service. The `service_deleted` activity carries no service
/// reference since the row disappears. Returns `false` when the id is unknown.
#[instrument(skip(db, actor), fields(actor = actor.name()))]
pub async fn delete_service(db: &DatabaseConnection, id: i32, actor: &Actor) -> Result<bool, ServiceError> {
    let txn = db.begin().await?;
    let Some(found) = service::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(false);
    };

    log_activity(
        &txn,
        ActivityType::ServiceDeleted,
        format!("Service '{}' was deleted", found.name),
        None,
        actor,
    )
    .await?;
    service::Entity::delete_by_id(found.id).exec(&txn).await?;
    txn.commit().await?;

    info!(id, name = %found.name, "deleted service");
    Ok(true)
}
