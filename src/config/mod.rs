//! # Taskboard Configuration
//!
//! YAML-based configuration with development/test/production overrides.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration (environment auto-detected)
//! let manager = ConfigManager::load()?;
//!
//! let database_url = manager.config().database_url();
//! let max_limit = manager.config().pagination.max_limit;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskboardConfig {
    /// Environment name, set by the loader from the detected environment
    pub environment: String,
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL; `${DATABASE_URL}` references are expanded at load time
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Environment-specific database name override
    pub database: Option<String>,
    pub pool: u32,
    pub checkout_timeout: u64,
    /// Apply bundled migrations on startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database: None,
            pool: 10,
            checkout_timeout: 10,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Get database name for the current environment
    pub fn database_name(&self, environment: &str) -> String {
        if let Some(db_name) = &self.database {
            return db_name.clone();
        }

        match environment {
            "test" => "taskboard_test".to_string(),
            "production" => "taskboard_production".to_string(),
            _ => "taskboard_development".to_string(),
        }
    }

    /// Connection URL, built from components when no explicit URL is configured
    pub fn database_url(&self, environment: &str) -> String {
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            return url.to_string();
        }

        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username,
            self.password,
            self.host,
            self.port,
            self.database_name(environment)
        )
    }

    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_secs(self.checkout_timeout)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
    pub cors: CorsConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_ms: 30_000,
            cors: CorsConfig::default(),
        }
    }
}

impl WebConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// CORS configuration; an empty origin list allows any origin
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Bearer token verification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret; `${JWT_SECRET}` references are expanded at load time
    pub jwt_secret: String,
    /// Clock skew tolerated when checking `exp`
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            leeway_seconds: 30,
        }
    }
}

/// List paging limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl TaskboardConfig {
    /// Get database URL for the configured environment
    pub fn database_url(&self) -> String {
        self.database.database_url(&self.environment)
    }

    /// Validate configuration values after loading
    pub fn validate(&self) -> ConfigResult<()> {
        let has_url = self.database.url.as_deref().is_some_and(|url| !url.is_empty());
        if !has_url && self.database.host.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "database.host",
                "database configuration",
            ));
        }

        if self.database.pool == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.pool",
                "0",
                "pool size must be greater than 0",
            ));
        }

        if self.web.bind_address.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "web.bind_address",
                "web configuration",
            ));
        }

        if self.web.request_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "web.request_timeout_ms",
                "0",
                "request timeout must be greater than 0",
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "auth.jwt_secret",
                "auth configuration",
            ));
        }

        if self.pagination.default_limit == 0 {
            return Err(ConfigurationError::invalid_value(
                "pagination.default_limit",
                "0",
                "default_limit must be greater than 0",
            ));
        }

        if self.pagination.max_limit < self.pagination.default_limit {
            return Err(ConfigurationError::invalid_value(
                "pagination.max_limit",
                self.pagination.max_limit.to_string(),
                "max_limit must not be smaller than default_limit",
            ));
        }

        Ok(())
    }
}
