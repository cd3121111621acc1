use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum HMAC secret length accepted for token signing.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest access token lifetime accepted, one year.
pub const MAX_ACCESS_TOKEN_HOURS: i64 = 24 * 365;

/// Longest reset token lifetime accepted, one day.
pub const MAX_RESET_TOKEN_MINUTES: i64 = 24 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub kafka: KafkaConfig,
    pub smtp: SmtpConfig,
    pub reset: ResetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
    #[serde(default = "default_reset_expiration_minutes")]
    pub reset_expiration_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub from: String,
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResetConfig {
    /// Page that receives the `token` query parameter.
    pub link_base_url: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    24
}

fn default_reset_expiration_minutes() -> i64 {
    15
}

fn default_starttls() -> bool {
    true
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SMTP__HOST, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// * `ConfigError` - A source failed to parse or a value is out of range
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Check values the deserializer cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if !(1..=MAX_ACCESS_TOKEN_HOURS).contains(&self.jwt.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}",
                MAX_ACCESS_TOKEN_HOURS
            )));
        }
        if !(1..=MAX_RESET_TOKEN_MINUTES).contains(&self.jwt.reset_expiration_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.reset_expiration_minutes must be between 1 and {}",
                MAX_RESET_TOKEN_MINUTES
            )));
        }
        if self.reset.link_base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "reset.link_base_url is required".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/accounts".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours: 24,
                reset_expiration_minutes: 15,
            },
            kafka: KafkaConfig {
                brokers: "localhost:9092".to_string(),
                topic: "account-events".to_string(),
            },
            smtp: SmtpConfig {
                host: "localhost".to_string(),
                port: 1025,
                username: String::new(),
                password: String::new(),
                from: "noreply@example.com".to_string(),
                starttls: false,
            },
            reset: ResetConfig {
                link_base_url: "http://localhost:3000/reset-password".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        assert!(config("0123456789abcdef0123456789abcdef").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        assert!(config("too-short").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetimes() {
        let mut config = config("0123456789abcdef0123456789abcdef");
        config.jwt.reset_expiration_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_lifetimes() {
        let mut config = config("0123456789abcdef0123456789abcdef");
        config.jwt.expiration_hours = i64::MAX;
        assert!(config.validate().is_err());

        config.jwt.expiration_hours = MAX_ACCESS_TOKEN_HOURS;
        config.jwt.reset_expiration_minutes = MAX_RESET_TOKEN_MINUTES + 1;
        assert!(config.validate().is_err());

        config.jwt.reset_expiration_minutes = MAX_RESET_TOKEN_MINUTES;
        assert!(config.validate().is_ok());
    }
}
