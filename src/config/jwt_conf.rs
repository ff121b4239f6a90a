use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Access token expiration time in minutes
    pub access_token_expiration: i64,
    /// Refresh token expiration time in minutes
    pub refresh_token_expiration: i64,
    /// Issuer written into and required on every token
    pub jwt_issuer: String,
}

const MIN_SECRET_LEN: usize = 32;

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required, >= 32 chars)
    /// - JWT_ACCESS_TOKEN_EXPIRY: Access token expiration in minutes (defaults to 60)
    /// - JWT_REFRESH_TOKEN_EXPIRY: Refresh token expiration in minutes (defaults to 10080 = 1 week)
    /// - JWT_ISSUER: JWT issuer (defaults to "hotel-backend")
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| {
                error!("JWT_SECRET environment variable not found");
                ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
            })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let access_token_expiration = Self::minutes_from_env("JWT_ACCESS_TOKEN_EXPIRY", 60)?;
        let refresh_token_expiration = Self::minutes_from_env("JWT_REFRESH_TOKEN_EXPIRY", 10080)?;
        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "hotel-backend".to_string());

        let config = JwtConfig {
            jwt_secret,
            access_token_expiration,
            refresh_token_expiration,
            jwt_issuer,
        };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    fn minutes_from_env(key: &str, default: i64) -> Result<i64, ConfigError> {
        match env::var(key) {
            Ok(raw) => raw.parse::<i64>().map_err(|e| {
                error!("Invalid {} value: {}", key, e);
                ConfigError::InvalidValue(format!("{}: {}", key, e))
            }),
            Err(_) => {
                warn!("{} not set, using default: {} minutes", key, default);
                Ok(default)
            }
        }
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            error!("JWT secret is too short (minimum {} characters required)", MIN_SECRET_LEN);
            return Err(ConfigError::ValidationError(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        if self.access_token_expiration <= 0 || self.refresh_token_expiration <= 0 {
            error!("Token expirations must be greater than 0");
            return Err(ConfigError::ValidationError("Token expirations must be greater than 0".to_string()));
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            warn!("Access token expiration is greater than or equal to refresh token expiration");
        }

        if self.jwt_issuer.is_empty() {
            return Err(ConfigError::ValidationError("JWT issuer cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Create JWT configuration for testing with default values
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes".to_string(),
            access_token_expiration: 60,
            refresh_token_expiration: 10080,
            jwt_issuer: "hotel-backend-test".to_string(),
        }
    }
}
