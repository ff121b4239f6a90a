use std::env;
use crate::config::ConfigError;

/// The single admin credential pair accepted by the login endpoint.
#[derive(Debug, Clone)]
pub struct AdminUserConfig {
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AdminUserConfig {
            email: env::var("ADMIN_EMAIL").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string()))?,
            password: env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email.trim().is_empty() {
            return Err(ConfigError::ValidationError("ADMIN_EMAIL cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::ValidationError("ADMIN_PASSWORD cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_email() {
        let config = AdminUserConfig { email: "  ".to_string(), password: "secret".to_string() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_pair() {
        let config = AdminUserConfig { email: "admin@hotel.com".to_string(), password: "secret".to_string() };
        assert!(config.validate().is_ok());
    }
}
