//! Application configuration
//!
//! Loaded once at start from a TOML file, then patched from environment
//! variables. Missing sections fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::{JwtConfig, DEFAULT_SECRET};
use crate::infrastructure::database::DatabaseConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "HR_CONFIG";

/// Shortest signing key accepted for HS256
pub const MIN_SECRET_LEN: usize = 32;

/// Longest token lifetime accepted, one week
pub const MAX_EXPIRATION_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests to drain on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt_secret: defaults.secret,
            jwt_issuer: defaults.issuer,
            jwt_audience: defaults.audience,
            jwt_expiration_minutes: defaults.expiration_minutes,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Bootstrap HR account created when the directory is empty
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@hrapplication.com".to_string(),
            name: "HR Administrator".to_string(),
            password: "Admin@123".to_string(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    /// Read `path`, apply environment overrides and validate the result.
    /// A missing file starts from the defaults, which still need a real
    /// `JWT_SECRET`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let security = &self.security;
        let secret = security.jwt_secret.trim();
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "jwt_secret",
                reason: "must not be empty".to_string(),
            });
        }
        if secret == DEFAULT_SECRET {
            return Err(ConfigError::Invalid {
                key: "jwt_secret",
                reason: "still set to the shipped placeholder; set JWT_SECRET".to_string(),
            });
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "jwt_secret",
                reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
            });
        }
        if !(1..=MAX_EXPIRATION_MINUTES).contains(&security.jwt_expiration_minutes) {
            return Err(ConfigError::Invalid {
                key: "jwt_expiration_minutes",
                reason: format!(
                    "{} is outside 1..={MAX_EXPIRATION_MINUTES}",
                    security.jwt_expiration_minutes
                ),
            });
        }
        Ok(())
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Overrides from `DATABASE_URL`, `JWT_SECRET` and `JWT_EXPIRATION_MINUTES`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(raw) = lookup("JWT_EXPIRATION_MINUTES") {
            self.security.jwt_expiration_minutes =
                raw.parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "JWT_EXPIRATION_MINUTES",
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            issuer: self.security.jwt_issuer.clone(),
            audience: self.security.jwt_audience.clone(),
            expiration_minutes: self.security.jwt_expiration_minutes,
        }
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }
}

/// `$HR_CONFIG`, else `~/.config/hr-directory/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hr-directory")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.security.jwt_issuer, "HRApplication");
        assert_eq!(config.security.jwt_expiration_minutes, 60);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_env(|key| match key {
                "DATABASE_URL" => Some("sqlite::memory:".to_string()),
                "JWT_EXPIRATION_MINUTES" => Some("15".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.jwt_config().expiration_minutes, 15);
    }

    fn with_secret(secret: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.security.jwt_secret = secret.to_string();
        config
    }

    #[test]
    fn shipped_defaults_do_not_validate() {
        let err = AppConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "jwt_secret", .. }));
    }

    #[test]
    fn weak_secrets_are_rejected() {
        for secret in ["", "   ", "short-secret"] {
            let err = with_secret(secret).validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "jwt_secret", .. }), "{secret:?}");
        }
        assert!(with_secret("a-real-deployment-secret-of-decent-length").validate().is_ok());
    }

    #[test]
    fn token_lifetime_must_be_in_range() {
        let mut config = with_secret("a-real-deployment-secret-of-decent-length");
        for minutes in [0, -5, MAX_EXPIRATION_MINUTES + 1, i64::MAX] {
            config.security.jwt_expiration_minutes = minutes;
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "jwt_expiration_minutes", .. }),
                "{minutes}"
            );
        }

        config.security.jwt_expiration_minutes = MAX_EXPIRATION_MINUTES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_fails_on_unparseable_file() {
        let path = std::env::temp_dir().join(format!("hr-directory-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\nport = ").unwrap();

        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn bad_env_number_is_reported() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(|key| (key == "JWT_EXPIRATION_MINUTES").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }
}
