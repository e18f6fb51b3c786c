use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

/// Settings for the recommendation HTTP service.
///
/// Every field has a default, so an absent `server.*` file and an empty
/// environment still yield a runnable service on port 5000.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to listen on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// TCP port (5000 by default)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request deadline in seconds; a `/recommend/train` that misses it
    /// leaves the current model in place
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest accepted JSON body in MB (training batches, catalog uploads)
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Requests per minute allowed for each API key
    #[serde(default = "default_rate_limit_per_minute")]
    pub rate_limit_per_minute: u32,

    /// API keys for authentication; an empty set disables authentication
    #[serde(default)]
    pub api_keys: HashSet<String>,

    /// Answer cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// `EnvFilter` directive for the JSON log output
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Install the Prometheus recorder and expose `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Optional YAML file with engine settings (`reco::RecoConfig`)
    #[serde(default)]
    pub engine_config_path: Option<String>,

    /// Fit the recommender with the bundled sample log at startup
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            rate_limit_per_minute: default_rate_limit_per_minute(),
            api_keys: HashSet::new(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            engine_config_path: None,
            seed_sample_data: default_true(),
        }
    }
}

impl ServerConfig {
    /// Read `server.{toml,yaml,json}` if present, then apply `RECO_SERVER__*`
    /// overrides
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("RECO_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;

        if config.api_keys.is_empty() {
            tracing::warn!("No API keys configured, authentication is disabled");
        }

        Ok(config)
    }

    /// Listen address built from `bind_addr` and `port`
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Body limit in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Whether protected routes require an API key
    pub fn auth_enabled(&self) -> bool {
        !self.api_keys.is_empty()
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_rate_limit_per_minute() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
