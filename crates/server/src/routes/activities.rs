use axum::{extract::{Query, State}, http::StatusCode, Json};
use tracing::info;

use service::{activity_service, actor::Actor, pagination::Page};

use crate::errors::ApiError;
use crate::routes::ServerState;
use crate::schemas::{ActivityCreate, ActivityOut, ActivityQuery};

#[utoipa::path(
    get, path = "/activities/", tag = "activities",
    params(ActivityQuery),
    responses((status = 200, description = "Activities, newest first", body = [crate::openapi::ActivityDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityOut>>, ApiError> {
    let page = Page::new(q.skip, q.limit);
    let rows = activity_service::list_activities(&state.db, q.service_id, page).await?;
    Ok(Json(rows.into_iter().map(ActivityOut::from).collect()))
}

#[utoipa::path(
    post, path = "/activities/", tag = "activities",
    request_body = crate::openapi::ActivityCreateDoc,
    responses(
        (status = 201, description = "Recorded", body = crate::openapi::ActivityDoc),
        (status = 404, description = "Service not found"),
        (status = 422, description = "Lifecycle types are reserved")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ActivityCreate>,
) -> Result<(StatusCode, Json<ActivityOut>), ApiError> {
    info!(activity_type = ?input.activity_type, service_id = ?input.service_id, "activity_create_request");
    let created = activity_service::record_activity(&state.db, input.into(), &Actor::system()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
