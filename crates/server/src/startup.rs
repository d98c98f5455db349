use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::{self, LogFormat};
use configs::{AppConfig, ChatConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use service::chat::{ChatForwarder, ChatSettings};

use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils; no-op when the binary already did.
fn init_logging() {
    logging::init_logging(LogFormat::from_env());
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Server-side chat defaults taken from configuration.
pub fn chat_settings(cfg: &ChatConfig) -> ChatSettings {
    ChatSettings {
        endpoint: cfg.endpoint.clone(),
        api_key: cfg.api_key.clone(),
        deployment_name: cfg.deployment_name.clone(),
        api_version: Some(cfg.api_version.clone()),
    }
}

/// Connect, migrate and assemble the handler state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = match models::db::connect_with_config(&cfg.database).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "database connection failed");
            return Err(e);
        }
    };
    // 启动时执行迁移，确保表结构就绪
    models::db::migrate(&db).await?;

    if !cfg.chat.is_configured() {
        info!("chat provider defaults incomplete; requests must carry credentials");
    }
    let timeout = cfg.chat.timeout_secs.map(Duration::from_secs);
    let chat = ChatForwarder::new(chat_settings(&cfg.chat), timeout)?;

    Ok(ServerState { db, chat: Arc::new(chat) })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // 配置文件缺失时回退到环境变量与默认值
    let cfg = AppConfig::load_or_env()?;
    let state = build_state(&cfg).await?;

    let app: Router = routes::build_router(state, build_cors());

    // 绑定地址并启动服务
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting service nexus api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_settings_carry_configured_version() {
        let cfg = ChatConfig { endpoint: Some("https://x.openai.azure.com".into()), ..ChatConfig::default() };
        let s = chat_settings(&cfg);
        assert_eq!(s.endpoint.as_deref(), Some("https://x.openai.azure.com"));
        assert_eq!(s.api_version.as_deref(), Some(configs::DEFAULT_CHAT_API_VERSION));
        assert!(s.api_key.is_none());
    }

    #[test]
    fn bind_addr_uses_server_section() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 8123;
        assert_eq!(load_bind_addr(&cfg).unwrap().port(), 8123);
    }
}
