use std::env;
use std::fmt;

use auth::PasswordPolicy;
use auth::SecretError;
use auth::SigningSecret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable accepted as an alias for `JWT__SECRET`.
pub const JWT_SECRET_VARIABLE: &str = "JWT_SECRET";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Accepted range for `jwt.expiration_hours`: one hour up to one year.
pub const MIN_EXPIRATION_HOURS: i64 = 1;
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenLifetimeError {
    #[error("JWT expiration_hours must be between {min} and {max}, got {actual}")]
    OutOfRange { min: i64, max: i64, actual: i64 },
}

fn default_expiration_hours() -> i64 {
    auth::DEFAULT_TOKEN_TTL_HOURS
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_SECRET` for the signing secret
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .set_override_option("jwt.secret", env::var(JWT_SECRET_VARIABLE).ok())?
            .build()?;

        configuration.try_deserialize()
    }

    /// Validate the configured signing secret.
    ///
    /// # Errors
    /// * `Missing` - No secret configured, or it is empty
    /// * `TooShort` - Secret is shorter than 32 bytes
    pub fn signing_secret(&self) -> Result<SigningSecret, SecretError> {
        match &self.jwt.secret {
            Some(secret) => SigningSecret::new(secret),
            None => Err(SecretError::Missing),
        }
    }

    /// Validate the configured token lifetime.
    ///
    /// # Errors
    /// * `OutOfRange` - `expiration_hours` is below one hour or above one year
    pub fn token_ttl(&self) -> Result<chrono::Duration, TokenLifetimeError> {
        let hours = self.jwt.expiration_hours;
        if !(MIN_EXPIRATION_HOURS..=MAX_EXPIRATION_HOURS).contains(&hours) {
            return Err(TokenLifetimeError::OutOfRange {
                min: MIN_EXPIRATION_HOURS,
                max: MAX_EXPIRATION_HOURS,
                actual: hours,
            });
        }
        Ok(chrono::Duration::hours(hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: Option<&str>) -> Config {
        config_with(secret, 2)
    }

    fn config_with(secret: Option<&str>, expiration_hours: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/users".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.map(str::to_string),
                expiration_hours,
            },
            password: PasswordPolicy::default(),
        }
    }

    #[test]
    fn test_signing_secret_missing() {
        let config = config_with_secret(None);
        assert_eq!(config.signing_secret().unwrap_err(), SecretError::Missing);
    }

    #[test]
    fn test_signing_secret_empty() {
        let config = config_with_secret(Some(""));
        assert_eq!(config.signing_secret().unwrap_err(), SecretError::Missing);
    }

    #[test]
    fn test_signing_secret_too_short() {
        let config = config_with_secret(Some("short"));
        assert_eq!(
            config.signing_secret().unwrap_err(),
            SecretError::TooShort { min: 32, actual: 5 }
        );
    }

    #[test]
    fn test_signing_secret_valid() {
        let config = config_with_secret(Some("0123456789abcdef0123456789abcdef"));
        assert!(config.signing_secret().is_ok());
        assert_eq!(config.token_ttl(), Ok(chrono::Duration::hours(2)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = config_with_secret(Some("0123456789abcdef0123456789abcdef"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_token_ttl_bounds() {
        assert_eq!(
            config_with(None, 1).token_ttl(),
            Ok(chrono::Duration::hours(1))
        );
        assert_eq!(
            config_with(None, 8760).token_ttl(),
            Ok(chrono::Duration::hours(8760))
        );
    }

    #[test]
    fn test_token_ttl_rejects_out_of_range() {
        for hours in [0, -1, 8761, 10_000_000_000, i64::MAX] {
            assert_eq!(
                config_with(None, hours).token_ttl(),
                Err(TokenLifetimeError::OutOfRange {
                    min: 1,
                    max: 8760,
                    actual: hours,
                })
            );
        }
    }
}
