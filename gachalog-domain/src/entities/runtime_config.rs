#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub upload_token: Option<String>,
    pub share_link_ttl_seconds: u64,
    pub cache_ttl_seconds: u64,
    pub cache_sweep_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5688".to_string(),
            data_dir: "./data/gacha_log".to_string(),
            upload_token: None,
            share_link_ttl_seconds: 7 * 24 * 3600,
            cache_ttl_seconds: 3600,
            cache_sweep_interval_seconds: 60,
            max_body_bytes: 32 * 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
