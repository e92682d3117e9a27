use serde::Deserialize;

use crate::infrastructure::services::DEFAULT_POPULAR_PAGE_SIZE;
use crate::infrastructure::upstream::DEFAULT_ANILIST_URL;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the two upstream providers live and how to talk to them
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Root of the video catalog JSON service
    pub catalog_base_url: String,
    /// AniList GraphQL endpoint
    pub metadata_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub popular_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: "http://localhost:3000".to_string(),
            metadata_base_url: DEFAULT_ANILIST_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("anime-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
            popular_page_size: DEFAULT_POPULAR_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.upstream.metadata_base_url, "https://graphql.anilist.co");
        assert_eq!(config.upstream.popular_page_size, 20);
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n\n[upstream]\ncatalog_base_url = \"http://catalog:4000\"\n\n[logging]\nformat = \"json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.upstream.catalog_base_url, "http://catalog:4000");
        assert_eq!(config.upstream.popular_page_size, 20);
        assert!(matches!(config.logging.format, LogFormat::Json));
    }
}
