//! Server configuration.

use std::env;

use auth::{JwtConfig, DEFAULT_JWT_EXPIRATION_HOURS};

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default MongoDB database name.
pub const DEFAULT_DATABASE_NAME: &str = "bookshelf";

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// MongoDB connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// MongoDB database name.
    pub database_name: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// JWT expiration in hours.
    pub jwt_expiration_hours: u64,
    /// Log level.
    pub log_level: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_name", &self.database_name)
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = lookup("BOOKSHELF_JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| anyhow::anyhow!("BOOKSHELF_JWT_SECRET is required"))?;

        Ok(Self {
            host: lookup("BOOKSHELF_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("BOOKSHELF_SERVER_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url: lookup("BOOKSHELF_DATABASE_URL").filter(|url| !url.is_empty()),
            database_name: lookup("BOOKSHELF_DATABASE_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            jwt_secret,
            jwt_expiration_hours: lookup("BOOKSHELF_JWT_EXPIRATION_HOURS")
                .and_then(|hours| hours.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            log_level: lookup("BOOKSHELF_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the JWT settings derived from this configuration.
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(&self.jwt_secret).with_expiration_hours(self.jwt_expiration_hours)
    }
}
