use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Jikan REST API base URL, without a trailing slash
    #[serde(default = "default_jikan_api_url")]
    pub jikan_api_url: String,

    /// Redis connection URL for the last-search store; in-memory when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Limit pre-filled in the page's limit field
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Sort order used when a request names none
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_jikan_api_url() -> String {
    "https://api.jikan.moe/v4".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_limit() -> u32 {
    10
}

fn default_sort() -> String {
    "recCountHighToLow".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jikan_api_url: default_jikan_api_url(),
            redis_url: None,
            host: default_host(),
            port: default_port(),
            default_limit: default_limit(),
            default_sort: default_sort(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_environment() {
        let vars: Vec<(String, String)> = Vec::new();
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.jikan_api_url, "https://api.jikan.moe/v4");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.default_sort, "recCountHighToLow");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("REDIS_URL".to_string(), "redis://cache:6379".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("DEFAULT_SORT".to_string(), "ABC".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_sort, "ABC");
    }
}
