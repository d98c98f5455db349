use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_DATABASE_URL: &str = "postgresql://postgres:postgres@db:5432/service_nexus";
pub const DEFAULT_CHAT_API_VERSION: &str = "2023-05-15";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Server-side defaults for the Azure OpenAI deployment used by `/chat/`.
///
/// Every field may also be supplied per request; request values win.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub deployment_name: Option<String>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Upper bound for the outbound completion call; unbounded when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment_name: None,
            api_version: default_api_version(),
            timeout_secs: None,
        }
    }
}

fn default_api_version() -> String { DEFAULT_CHAT_API_VERSION.to_string() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map_or(false, |io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (default `config.toml`). Only a missing file falls
    /// back to defaults; unreadable or malformed files are errors.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path(), env_lookup)
    }

    pub fn load_or_env_from<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e.context(format!("failed to load config file {}", path))),
        };
        cfg.fill_server_from(&lookup);
        cfg.normalize_and_validate_with(&lookup)?;
        Ok(cfg)
    }

    /// Fill env fallbacks from `lookup` and validate every section.
    pub fn normalize_and_validate_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.normalize()?;
        self.database.normalize_from(&lookup);
        self.database.validate()?;
        self.chat.normalize_from(&lookup);
        Ok(())
    }

    fn fill_server_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from `DATABASE_URL`, then from the built-in default.
    pub fn normalize_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.url.trim().is_empty() {
            self.url = lookup("DATABASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgresql://, postgres:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl ChatConfig {
    /// Fill unset fields from the `AZURE_OPENAI_*` variables. Blank values count as unset.
    pub fn normalize_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if self.endpoint.as_deref().map_or(true, |v| v.trim().is_empty()) {
            self.endpoint = non_blank("AZURE_OPENAI_ENDPOINT");
        }
        if self.api_key.as_deref().map_or(true, |v| v.trim().is_empty()) {
            self.api_key = non_blank("AZURE_OPENAI_API_KEY");
        }
        if self.deployment_name.as_deref().map_or(true, |v| v.trim().is_empty()) {
            self.deployment_name = non_blank("AZURE_OPENAI_DEPLOYMENT_NAME");
        }
        if let Some(version) = non_blank("AZURE_OPENAI_API_VERSION") {
            if self.api_version.trim().is_empty() || self.api_version == DEFAULT_CHAT_API_VERSION {
                self.api_version = version;
            }
        }
        if self.api_version.trim().is_empty() {
            self.api_version = default_api_version();
        }
    }

    /// True when key, endpoint and deployment are all present.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some() && self.deployment_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn parses_full_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://u:p@localhost/nexus"
            max_connections = 5

            [chat]
            endpoint = "https://example.openai.azure.com/"
            deployment_name = "gpt"
            timeout_secs = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.chat.api_version, DEFAULT_CHAT_API_VERSION);
        assert_eq!(cfg.chat.timeout_secs, Some(20));
        assert!(cfg.chat.api_key.is_none());
    }

    #[test]
    fn database_url_falls_back_to_env_then_default() {
        let mut db = DatabaseConfig::default();
        db.normalize_from(vars(&[("DATABASE_URL", "sqlite::memory:")]));
        assert_eq!(db.url, "sqlite::memory:");

        let mut db = DatabaseConfig::default();
        db.normalize_from(vars(&[]));
        assert_eq!(db.url, DEFAULT_DATABASE_URL);
        assert!(db.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_scheme_and_bad_pool_bounds() {
        let db = DatabaseConfig { url: "mysql://localhost/x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());

        let db = DatabaseConfig {
            url: "postgres://localhost/x".into(),
            min_connections: 5,
            max_connections: 2,
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn chat_fields_from_env_do_not_override_file_values() {
        let mut chat = ChatConfig { deployment_name: Some("from-file".into()), ..ChatConfig::default() };
        chat.normalize_from(vars(&[
            ("AZURE_OPENAI_ENDPOINT", "https://env.example.com"),
            ("AZURE_OPENAI_API_KEY", "k"),
            ("AZURE_OPENAI_DEPLOYMENT_NAME", "from-env"),
            ("AZURE_OPENAI_API_VERSION", "2024-02-01"),
        ]));
        assert_eq!(chat.endpoint.as_deref(), Some("https://env.example.com"));
        assert_eq!(chat.deployment_name.as_deref(), Some("from-file"));
        assert_eq!(chat.api_version, "2024-02-01");
        assert!(chat.is_configured());
    }

    #[test]
    fn blank_chat_env_values_stay_unset() {
        let mut chat = ChatConfig::default();
        chat.normalize_from(vars(&[("AZURE_OPENAI_API_KEY", "  ")]));
        assert!(chat.api_key.is_none());
        assert!(!chat.is_configured());
    }

    fn write_config(name: &str, body: &str) -> String {
        let path = std::env::temp_dir().join(format!("nexus-{}-{}.toml", std::process::id(), name));
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn partial_server_section_keeps_database_url() {
        let path = write_config(
            "partial",
            "[server]\nhost = \"127.0.0.1\"\n[database]\nurl = \"postgres://u:p@prod/nexus\"\n",
        );
        let cfg = AppConfig::load_or_env_from(&path, vars(&[])).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.database.url, "postgres://u:p@prod/nexus");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = write_config("malformed", "[database\nurl = 1\n");
        let res = AppConfig::load_or_env_from(&path, vars(&[]));
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = std::env::temp_dir().join(format!("nexus-{}-absent.toml", std::process::id()));
        let cfg = AppConfig::load_or_env_from(
            &path.to_string_lossy(),
            vars(&[("SERVER_PORT", "9100"), ("DATABASE_URL", "sqlite::memory:")]),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.database.url, "sqlite::memory:");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate_with(vars(&[])).is_err());
    }
}
