use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Default upload ceiling: 10 MiB
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinioConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    /// Public base URL that hosted image links are built from
    pub links_prefix: String,
    pub region: Option<String>,
    pub secure: bool,
    pub upload_max_bytes: usize,
}

impl MinioConfig {
    /// Load MinIO configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MINIO_ENDPOINT: MinIO server endpoint (e.g., "localhost:9000")
    /// - MINIO_ACCESS_KEY / MINIO_SECRET_KEY: credentials
    /// - MINIO_BUCKET_NAME: bucket images are written to
    /// - MINIO_LINKS_PREFIX: public base URL for hosted links
    /// - MINIO_REGION: Optional region (defaults to "us-east-1")
    /// - MINIO_SECURE: Whether to use HTTPS (defaults to false)
    /// - UPLOAD_MAX_BYTES: upload ceiling in bytes (defaults to 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MinIO configuration from environment variables");

        let endpoint = Self::required("MINIO_ENDPOINT")?;
        debug!("MinIO endpoint: {}", endpoint);
        let access_key = Self::required("MINIO_ACCESS_KEY")?;
        let secret_key = Self::required("MINIO_SECRET_KEY")?;
        let bucket_name = Self::required("MINIO_BUCKET_NAME")?;
        debug!("MinIO bucket name: {}", bucket_name);

        let region = env::var("MINIO_REGION").ok().or_else(|| {
            warn!("MINIO_REGION not set, using default: us-east-1");
            Some("us-east-1".to_string())
        });

        let secure = env::var("MINIO_SECURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                warn!("MINIO_SECURE not set or invalid, defaulting to false (HTTP)");
                false
            });

        let links_prefix = env::var("MINIO_LINKS_PREFIX").unwrap_or_else(|_| {
            let protocol = if secure { "https" } else { "http" };
            let prefix = format!("{}://{}", protocol, endpoint);
            warn!("MINIO_LINKS_PREFIX not set, using endpoint: {}", prefix);
            prefix
        });

        let upload_max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                error!("Invalid UPLOAD_MAX_BYTES value");
                ConfigError::InvalidValue("Invalid UPLOAD_MAX_BYTES value".to_string())
            })?,
            Err(_) => DEFAULT_UPLOAD_MAX_BYTES,
        };

        let config = Self {
            endpoint,
            access_key,
            secret_key,
            bucket_name,
            links_prefix,
            region,
            secure,
            upload_max_bytes,
        };

        info!("MinIO configuration loaded successfully");
        Ok(config)
    }

    fn required(key: &str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| {
            error!("{} environment variable not found", key);
            ConfigError::EnvVarNotFound(key.to_string())
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError("Endpoint cannot be empty".to_string()));
        }

        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(ConfigError::ValidationError("Access key and secret key cannot be empty".to_string()));
        }

        if !self.bucket_name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.') {
            error!("Invalid bucket name format: {}", self.bucket_name);
            return Err(ConfigError::ValidationError(
                "Bucket name contains invalid characters".to_string(),
            ));
        }

        if self.bucket_name.len() < 3 || self.bucket_name.len() > 63 {
            return Err(ConfigError::ValidationError(
                "Bucket name must be between 3 and 63 characters".to_string(),
            ));
        }

        if self.upload_max_bytes == 0 {
            return Err(ConfigError::ValidationError("Upload limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Get the full endpoint URL with protocol
    pub fn get_endpoint_url(&self) -> String {
        let protocol = if self.secure { "https" } else { "http" };
        format!("{}://{}", protocol, self.endpoint)
    }
}

impl Default for MinioConfig {
    fn default() -> Self {
        Self {
            endpoint: "localhost:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket_name: "hotel-images".to_string(),
            links_prefix: "http://localhost:9000".to_string(),
            region: Some("us-east-1".to_string()),
            secure: false,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}
