use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use tracing::info;

use service::{activity_service, actor::Actor, service_catalog};

use crate::errors::ApiError;
use crate::routes::ServerState;
use crate::schemas::{ActivityOut, ListQuery, ServiceCreate, ServiceOut, ServiceUpdate};

#[utoipa::path(
    get, path = "/services/", tag = "services",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ServiceDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ServiceOut>>, ApiError> {
    let rows = service_catalog::list_services(&state.db, q.into()).await?;
    info!(count = rows.len(), "list services");
    Ok(Json(rows.into_iter().map(ServiceOut::from).collect()))
}

#[utoipa::path(
    post, path = "/services/", tag = "services",
    request_body = crate::openapi::ServiceCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Client not found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ServiceCreate>,
) -> Result<(StatusCode, Json<ServiceOut>), ApiError> {
    info!(name = %input.name, client_id = input.client_id, "service_create_request");
    let created = service_catalog::create_service(&state.db, input.into(), &Actor::system()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<ServiceOut>, ApiError> {
    service_catalog::get_service(&state.db, id)
        .await?
        .map(|m| Json(m.into()))
        .ok_or_else(|| ApiError::not_found("Service"))
}

#[utoipa::path(
    put, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    request_body = crate::openapi::ServiceUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Service not found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<ServiceUpdate>,
) -> Result<Json<ServiceOut>, ApiError> {
    service_catalog::update_service(&state.db, id, input.into(), &Actor::system())
        .await?
        .map(|m| Json(m.into()))
        .ok_or_else(|| ApiError::not_found("Service"))
}

#[utoipa::path(
    delete, path = "/services/{id}", tag = "services",
    params(("id" = i32, Path, description = "Service id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    if service_catalog::delete_service(&state.db, id, &Actor::system()).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Service"))
    }
}

#[utoipa::path(
    get, path = "/services/{id}/activities", tag = "services",
    params(("id" = i32, Path, description = "Service id"), ListQuery),
    responses(
        (status = 200, description = "Activities, newest first", body = [crate::openapi::ActivityDoc]),
        (status = 404, description = "Service not found")
    )
)]
pub async fn activities(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ActivityOut>>, ApiError> {
    if service_catalog::get_service(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("Service"));
    }
    let rows = activity_service::list_activities(&state.db, Some(id), q.into()).await?;
    Ok(Json(rows.into_iter().map(ActivityOut::from).collect()))
}
