//! Application configuration module
//!
//! Process-wide settings, loaded once at startup from the environment
//! (after `.env` has been read) or assembled with [`AppConfigBuilder`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_PAGE_SIZE: u32 = 2;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3 * 60 * 60);
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 256;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared HMAC secret used to sign and verify tokens
    pub jwt_secret: String,
    /// Store connection string; the in-memory store is used when absent
    pub database_url: Option<String>,
    pub server_port: u16,
    /// Number of posts per page in listings
    pub page_size: u32,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Directory uploaded images are written to
    pub images_dir: PathBuf,
    pub bcrypt_cost: u32,
    /// Queue length per event subscriber before events are dropped
    pub subscriber_capacity: usize,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from environment variables
    ///
    /// `JWT_SECRET` is required; everything else falls back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            builder = builder.server_port(port);
        }
        if let Some(size) = env_parse::<u32>("POSTS_PAGE_SIZE")? {
            builder = builder.page_size(size);
        }
        if let Some(secs) = env_parse::<u64>("TOKEN_TTL_SECS")? {
            builder = builder.token_ttl(Duration::from_secs(secs));
        }
        if let Ok(dir) = std::env::var("IMAGES_DIR") {
            builder = builder.images_dir(dir);
        }
        if let Some(cost) = env_parse::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(capacity) = env_parse::<usize>("SUBSCRIBER_CAPACITY")? {
            builder = builder.subscriber_capacity(capacity);
        }
        if let Some(bytes) = env_parse::<usize>("MAX_UPLOAD_BYTES")? {
            builder = builder.max_upload_bytes(bytes);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "POSTS_PAGE_SIZE",
                value: "0".to_string(),
            });
        }
        if self.token_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                value: "0".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.subscriber_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SUBSCRIBER_CAPACITY",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    database_url: Option<String>,
    server_port: Option<u16>,
    page_size: Option<u32>,
    token_ttl: Option<Duration>,
    images_dir: Option<PathBuf>,
    bcrypt_cost: Option<u32>,
    subscriber_capacity: Option<usize>,
    max_upload_bytes: Option<usize>,
}

impl AppConfigBuilder {
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = Some(dir.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn subscriber_capacity(mut self, capacity: usize) -> Self {
        self.subscriber_capacity = Some(capacity);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            images_dir: self
                .images_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            subscriber_capacity: self
                .subscriber_capacity
                .unwrap_or(DEFAULT_SUBSCRIBER_CAPACITY),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults() {
        let config = AppConfig::builder().jwt_secret("secret").build().unwrap();
        assert_eq!(config.page_size, 2);
        assert_eq!(config.token_ttl, Duration::from_secs(10800));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.images_dir, PathBuf::from("images"));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_missing_secret() {
        assert_matches!(
            AppConfig::builder().build(),
            Err(ConfigError::MissingValue("JWT_SECRET"))
        );
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_matches!(
            AppConfig::builder().jwt_secret("secret").page_size(0).build(),
            Err(ConfigError::InvalidValue { key: "POSTS_PAGE_SIZE", .. })
        );
    }

    #[test]
    fn test_blank_database_url_is_none() {
        let config = AppConfig::builder()
            .jwt_secret("secret")
            .database_url("  ")
            .build()
            .unwrap();
        assert!(config.database_url.is_none());
    }
}
