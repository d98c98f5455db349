use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Message};
use service::chat::ChatForwarder;

use crate::openapi::ApiDoc;

pub mod activities;
pub mod chat;
pub mod clients;
pub mod services;

/// Shared handler state: the connection pool and the chat forwarder.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub chat: Arc<ChatForwarder>,
}

#[utoipa::path(
    get, path = "/", tag = "health",
    responses((status = 200, description = "Welcome message", body = crate::openapi::MessageDoc))
)]
pub async fn root() -> Json<Message> {
    Json(Message::welcome())
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let catalog = Router::new()
        .route("/services/", get(services::list).post(services::create))
        .route(
            "/services/:id",
            get(services::get).put(services::update).delete(services::delete),
        )
        .route("/services/:id/activities", get(services::activities))
        .route("/clients/", get(clients::list).post(clients::create))
        .route("/clients/:id", get(clients::get))
        .route("/clients/:id/services", get(clients::services))
        .route("/activities/", get(activities::list).post(activities::create));

    let assistant = Router::new()
        .route("/chat/", post(chat::chat))
        .route("/chat/health", get(chat::health));

    public
        .merge(catalog)
        .merge(assistant)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
