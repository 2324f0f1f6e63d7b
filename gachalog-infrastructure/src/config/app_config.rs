use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};

use gachalog_domain::RuntimeConfig;

/// Where a loaded config came from. Reported once logging is up, since
/// `log_dir` is only known after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults(PathBuf),
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::Defaults(PathBuf::from("./config.toml"))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub upload_token: Option<String>,
    pub share_link_ttl_seconds: u64,
    pub cache_ttl_seconds: u64,
    pub cache_sweep_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
    #[serde(skip)]
    pub source: ConfigSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            data_dir: runtime.data_dir,
            upload_token: runtime.upload_token,
            share_link_ttl_seconds: runtime.share_link_ttl_seconds,
            cache_ttl_seconds: runtime.cache_ttl_seconds,
            cache_sweep_interval_seconds: runtime.cache_sweep_interval_seconds,
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
            log_dir: None,
            source: ConfigSource::default(),
        }
    }
}

impl AppConfig {
    /// Reads `$GACHALOG_CONFIG` (default `./config.toml`).
    pub async fn load() -> Result<Self> {
        let path = env::var("GACHALOG_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config: AppConfig = toml::from_str(&content)?;
            config.source = ConfigSource::File(file_path.to_path_buf());
            config
        } else {
            AppConfig {
                source: ConfigSource::Defaults(file_path.to_path_buf()),
                ..AppConfig::default()
            }
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn log_source(&self) {
        match &self.source {
            ConfigSource::File(path) => info!("loaded config from {}", path.display()),
            ConfigSource::Defaults(path) => {
                warn!("{} not found, using defaults", path.display())
            }
        }
    }

    pub fn normalize(&mut self) {
        if let Some(token) = &self.upload_token {
            if token.trim().is_empty() {
                self.upload_token = None;
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.share_link_ttl_seconds == 0 || self.cache_ttl_seconds == 0 {
            return Err(anyhow!("ttl values must be greater than 0"));
        }
        if self.cache_sweep_interval_seconds == 0 {
            return Err(anyhow!("cache_sweep_interval_seconds must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            data_dir: self.data_dir.clone(),
            upload_token: self.upload_token.clone(),
            share_link_ttl_seconds: self.share_link_ttl_seconds,
            cache_ttl_seconds: self.cache_ttl_seconds,
            cache_sweep_interval_seconds: self.cache_sweep_interval_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("GACHALOG_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("GACHALOG_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("GACHALOG_UPLOAD_TOKEN") {
            self.upload_token = Some(value);
        }
        if let Ok(value) = env::var("GACHALOG_SHARE_LINK_TTL_SECONDS") {
            self.share_link_ttl_seconds = value.parse().unwrap_or(self.share_link_ttl_seconds);
        }
        if let Ok(value) = env::var("GACHALOG_CACHE_TTL_SECONDS") {
            self.cache_ttl_seconds = value.parse().unwrap_or(self.cache_ttl_seconds);
        }
        if let Ok(value) = env::var("GACHALOG_CACHE_SWEEP_INTERVAL_SECONDS") {
            self.cache_sweep_interval_seconds =
                value.parse().unwrap_or(self.cache_sweep_interval_seconds);
        }
        if let Ok(value) = env::var("GACHALOG_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("GACHALOG_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("GACHALOG_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
