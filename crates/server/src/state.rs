use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::telemetry::PrometheusMetrics;
use dashmap::DashMap;
use metrics_exporter_prometheus::PrometheusHandle;
use reco::{CoOccurrenceRecommender, FeatureSimilarityMatcher, ModelRegistry, RecoConfig};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: API key -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, std::time::Instant)>>,

    /// Recommender and matcher (shared across requests)
    pub registry: Arc<ModelRegistry>,

    /// Render handle for `/metrics`; absent until a recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state
    ///
    /// Loads the engine YAML when `engine_config_path` is set and, unless
    /// disabled, fits the recommender with the bundled sample interactions.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config
            .socket_addr()
            .map_err(|err| ServerError::Config(format!("invalid bind address: {err}")))?;
        if config.max_body_size_mb == 0 {
            return Err(ServerError::Config(
                "max_body_size_mb must be >= 1".to_string(),
            ));
        }

        let engine_config = match &config.engine_config_path {
            Some(path) => RecoConfig::from_file(path)?,
            None => RecoConfig::default(),
        };

        let recorder = Arc::new(PrometheusMetrics);
        let registry = ModelRegistry::with_components(
            engine_config,
            CoOccurrenceRecommender::new().with_metrics(recorder.clone()),
            FeatureSimilarityMatcher::new().with_metrics(recorder),
        );

        if config.seed_sample_data {
            let trained_on = registry.seed_sample_data();
            tracing::info!(trained_on, "seeded recommender with sample interactions");
        }

        Ok(Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            registry: Arc::new(registry),
            prometheus: None,
        })
    }

    /// Attach the Prometheus render handle used by `/metrics`
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Check rate limit for API key
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = std::time::Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn seeds_sample_data_by_default() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        let stats = state.registry.stats();
        assert_eq!(stats.recommender.interactions, 15);
        assert_eq!(stats.recommender.items, 9);
        assert!(state.prometheus.is_none());
    }

    #[test]
    fn seeding_can_be_disabled() {
        let config = ServerConfig {
            seed_sample_data: false,
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        assert!(!state.registry.recommender().is_fitted());
    }

    #[test]
    fn loads_engine_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "version: \"1.0\"\nrecommender:\n  default_top_n: 2\nmatcher:\n  default_top_n: 3\n"
        )
        .unwrap();
        let config = ServerConfig {
            engine_config_path: Some(file.path().display().to_string()),
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        assert_eq!(state.registry.config().recommender.default_top_n, 2);
        assert_eq!(state.registry.config().matcher.default_top_n, 3);
    }

    #[test]
    fn missing_engine_yaml_is_an_error() {
        let config = ServerConfig {
            engine_config_path: Some("/definitely/not/here.yaml".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            ServerState::new(config),
            Err(ServerError::Engine(_))
        ));
    }

    #[test]
    fn rejects_unusable_server_settings() {
        let bad_addr = ServerConfig {
            bind_addr: "not an address".into(),
            seed_sample_data: false,
            ..ServerConfig::default()
        };
        assert!(matches!(
            ServerState::new(bad_addr),
            Err(ServerError::Config(_))
        ));

        let no_body = ServerConfig {
            max_body_size_mb: 0,
            seed_sample_data: false,
            ..ServerConfig::default()
        };
        assert!(matches!(
            ServerState::new(no_body),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn rate_limit_window() {
        let config = ServerConfig {
            rate_limit_per_minute: 2,
            seed_sample_data: false,
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        assert!(state.check_rate_limit("k"));
        assert!(state.check_rate_limit("k"));
        assert!(!state.check_rate_limit("k"));
        assert!(state.check_rate_limit("other"));
    }
}
