use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use tracing::info;

use service::{client_service, pagination::Page, service_catalog};

use crate::errors::ApiError;
use crate::routes::ServerState;
use crate::schemas::{ClientCreate, ClientOut, ClientWithServices, ListQuery, ServiceOut};

#[utoipa::path(
    get, path = "/clients/", tag = "clients",
    params(ListQuery),
    responses((status = 200, description = "List OK", body = [crate::openapi::ClientDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ClientOut>>, ApiError> {
    let rows = client_service::list_clients(&state.db, q.into()).await?;
    info!(count = rows.len(), "list clients");
    Ok(Json(rows.into_iter().map(ClientOut::from).collect()))
}

#[utoipa::path(
    post, path = "/clients/", tag = "clients",
    request_body = crate::openapi::ClientCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ClientDoc),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ClientCreate>,
) -> Result<(StatusCode, Json<ClientOut>), ApiError> {
    let created = client_service::create_client(&state.db, input.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ClientDoc),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<ClientOut>, ApiError> {
    client_service::get_client(&state.db, id)
        .await?
        .map(|m| Json(m.into()))
        .ok_or_else(|| ApiError::not_found("Client"))
}

#[utoipa::path(
    get, path = "/clients/{id}/services", tag = "clients",
    params(("id" = i32, Path, description = "Client id"), ListQuery),
    responses(
        (status = 200, description = "Client with its services", body = crate::openapi::ClientWithServicesDoc),
        (status = 404, description = "Client not found")
    )
)]
pub async fn services(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(q): Query<ListQuery>,
) -> Result<Json<ClientWithServices>, ApiError> {
    let client = client_service::get_client(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client"))?;
    let page: Page = q.into();
    let services = service_catalog::list_services_for_client(&state.db, id, page).await?;
    Ok(Json(ClientWithServices {
        client: client.into(),
        services: services.into_iter().map(ServiceOut::from).collect(),
    }))
}
