//! Chat forwarder for Azure OpenAI chat-completion deployments.
//!
//! One message in, one reply out: no retry, no streaming, no history. The
//! forwarder never fails towards its caller; every problem becomes reply text.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const SYSTEM_PROMPT: &str = "You are a service management AI assistant for Service Nexus, helping with managed service offerings lifecycle and operations.";
pub const MAX_TOKENS: u32 = 800;
pub const TEMPERATURE: f32 = 0.7;
pub const DEFAULT_API_VERSION: &str = "2023-05-15";
pub const NOT_CONFIGURED_REPLY: &str = "AI assistant is not configured. Please set up Azure OpenAI credentials in the .env file or provide them with the request.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Azure OpenAI is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Azure OpenAI API error: {status} {body}")]
    Provider { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Provider credentials. Any field may be missing; see [`ChatSettings::overlay`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment_name: Option<String>,
    pub api_version: Option<String>,
}

/// Fully resolved credentials for one call.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Resolved {
    endpoint: String,
    api_key: String,
    deployment_name: String,
    api_version: String,
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

impl ChatSettings {
    /// Field-wise merge: non-blank values in `overrides` win over `self`.
    pub fn overlay(&self, overrides: &ChatSettings) -> ChatSettings {
        ChatSettings {
            endpoint: non_blank(&overrides.endpoint).or_else(|| non_blank(&self.endpoint)),
            api_key: non_blank(&overrides.api_key).or_else(|| non_blank(&self.api_key)),
            deployment_name: non_blank(&overrides.deployment_name).or_else(|| non_blank(&self.deployment_name)),
            api_version: non_blank(&overrides.api_version).or_else(|| non_blank(&self.api_version)),
        }
    }

    fn resolve(&self) -> Result<Resolved, ChatError> {
        match (non_blank(&self.endpoint), non_blank(&self.api_key), non_blank(&self.deployment_name)) {
            (Some(endpoint), Some(api_key), Some(deployment_name)) => Ok(Resolved {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                api_key,
                deployment_name,
                api_version: non_blank(&self.api_version).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            }),
            _ => Err(ChatError::NotConfigured),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: [CompletionMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Result of probing the provider with the effective credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatHealth {
    pub status: &'static str,
    pub message: String,
}

impl ChatHealth {
    fn healthy() -> Self { Self { status: "healthy", message: "Connected to Azure OpenAI successfully".into() } }
    fn error(message: String) -> Self { Self { status: "error", message } }
}

/// Stateless forwarder. Server defaults are fixed at construction; per-call
/// overrides never mutate shared state.
pub struct ChatForwarder {
    http: reqwest::Client,
    defaults: ChatSettings,
}

impl ChatForwarder {
    pub fn new(defaults: ChatSettings, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self { http: builder.build()?, defaults })
    }

    /// Send one completion request and return the assistant text.
    pub async fn complete(&self, message: &str, overrides: &ChatSettings) -> Result<String, ChatError> {
        let cfg = self.defaults.overlay(overrides).resolve()?;
        let url = format!("{}/openai/deployments/{}/chat/completions", cfg.endpoint, cfg.deployment_name);
        debug!(%url, api_version = %cfg.api_version, "forwarding chat completion");

        let body = CompletionRequest {
            messages: [
                CompletionMessage { role: "system", content: SYSTEM_PROMPT },
                CompletionMessage { role: "user", content: message },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let resp = self
            .http
            .post(&url)
            .query(&[("api-version", cfg.api_version.as_str())])
            .header("api-key", &cfg.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Provider { status: status.as_u16(), body });
        }

        let parsed: CompletionResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::MalformedResponse("no choices with content".into()))
    }

    /// Like [`ChatForwarder::complete`], with every failure turned into reply text.
    pub async fn reply(&self, message: &str, overrides: &ChatSettings) -> String {
        match self.complete(message, overrides).await {
            Ok(text) => {
                info!(reply_len = text.len(), "chat completion succeeded");
                text
            }
            Err(ChatError::NotConfigured) => {
                warn!("chat requested without Azure OpenAI credentials");
                NOT_CONFIGURED_REPLY.to_string()
            }
            Err(e) => {
                warn!(error = %e, "chat completion failed");
                format!("I encountered an error: {}. Please ensure Azure OpenAI is properly configured.", e)
            }
        }
    }

    /// List the deployments to check that endpoint and key are usable.
    pub async fn health(&self, overrides: &ChatSettings) -> ChatHealth {
        let cfg = match self.defaults.overlay(overrides).resolve() {
            Ok(cfg) => cfg,
            Err(_) => return ChatHealth::error("Azure OpenAI is not configured".into()),
        };
        let url = format!("{}/openai/deployments", cfg.endpoint);
        let res = self
            .http
            .get(&url)
            .query(&[("api-version", cfg.api_version.as_str())])
            .header("api-key", &cfg.api_key)
            .send()
            .await;
        match res {
            Ok(resp) if resp.status().is_success() => ChatHealth::healthy(),
            Ok(resp) => ChatHealth::error(format!("Failed to connect: {}", resp.status())),
            Err(e) => ChatHealth::error(format!("Error connecting to Azure OpenAI: {}", e)),
        }
    }
}
