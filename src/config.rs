use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API read access token, sent as a bearer token
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL. The in-memory store is used when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Lifetime of a cached catalog response
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Quiet period before a typed query turns into a suggestion fetch
    #[serde(default = "default_suggestion_debounce_ms")]
    pub suggestion_debounce_ms: u64,

    /// Quiet period before playback progress is written to storage
    #[serde(default = "default_progress_debounce_ms")]
    pub progress_debounce_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_suggestion_debounce_ms() -> u64 {
    250
}

fn default_progress_debounce_ms() -> u64 {
    200
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn suggestion_debounce(&self) -> Duration {
        Duration::from_millis(self.suggestion_debounce_ms)
    }

    pub fn progress_debounce(&self) -> Duration {
        Duration::from_millis(self.progress_debounce_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let vars = vec![("TMDB_API_KEY".to_string(), "token".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_api_key, "token");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert_eq!(config.suggestion_debounce(), Duration::from_millis(250));
        assert_eq!(config.progress_debounce(), Duration::from_millis(200));
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let vars: Vec<(String, String)> = vec![("PORT".to_string(), "8080".to_string())];
        let result = envy::from_iter::<_, Config>(vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_redis_url_is_optional() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "token".to_string()),
            ("REDIS_URL".to_string(), "redis://cache:6379".to_string()),
            ("CACHE_TTL_SECS".to_string(), "30".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
    }
}
