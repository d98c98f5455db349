use axum::{extract::State, Json};
use tracing::info;

use service::chat::{ChatHealth, ChatSettings};

use crate::routes::ServerState;
use crate::schemas::{ChatRequest, ChatResponse};

/// Forward one message to the configured deployment. Failures become reply text.
#[utoipa::path(
    post, path = "/chat/", tag = "chat",
    request_body = crate::openapi::ChatRequestDoc,
    responses((status = 200, description = "Assistant reply", body = crate::openapi::ChatResponseDoc))
)]
pub async fn chat(State(state): State<ServerState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    info!(chars = req.message.chars().count(), "chat_request");
    let response = state.chat.reply(&req.message, &req.credentials()).await;
    Json(ChatResponse { response })
}

#[utoipa::path(
    get, path = "/chat/health", tag = "chat",
    responses((status = 200, description = "Provider reachability", body = crate::openapi::ChatHealthDoc))
)]
pub async fn health(State(state): State<ServerState>) -> Json<ChatHealth> {
    Json(state.chat.health(&ChatSettings::default()).await)
}
