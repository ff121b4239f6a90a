use async_trait::async_trait;
use minio::s3::args::{BucketExistsArgs, MakeBucketArgs, PutObjectArgs};
use minio::s3::client::{Client, ClientBuilder};
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use std::io::Cursor;
use tracing::{debug, error, info, instrument, warn};

use crate::config::MinioConfig;

/// Where uploaded images end up. Returns the public URL of the stored object.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn store_image(&self, object_name: &str, data: Vec<u8>, content_type: &str) -> Result<String, MinioError>;
}

#[derive(Debug, Clone)]
pub struct MinioService {
    client: Client,
    pub config: MinioConfig,
}

impl MinioService {
    #[instrument(skip(config), fields(endpoint = %config.endpoint, bucket = %config.bucket_name))]
    pub async fn new(config: MinioConfig) -> Result<Self, MinioError> {
        info!("Initializing MinIO service");

        config.validate().map_err(|e| {
            error!("MinIO configuration validation failed: {}", e);
            MinioError::ConfigError(e.to_string())
        })?;

        let base_url = config.get_endpoint_url().parse::<BaseUrl>().map_err(|e| {
            error!("Failed to parse MinIO endpoint URL: {}", e);
            MinioError::ConnectionError(format!("Invalid endpoint URL: {}", e))
        })?;

        debug!("Creating MinIO client with endpoint: {}", config.get_endpoint_url());
        let static_provider = StaticProvider::new(&config.access_key, &config.secret_key, None);

        let client = ClientBuilder::new(base_url)
            .provider(Some(Box::new(static_provider)))
            .build()
            .map_err(|e| {
                error!("Failed to create MinIO client: {}", e);
                MinioError::ConnectionError(format!("Client creation failed: {}", e))
            })?;

        let service = Self { client, config };
        service.ensure_bucket_exists().await?;

        info!("MinIO service initialized successfully");
        Ok(service)
    }

    /// Ensure the configured bucket exists, create if it doesn't
    #[instrument(skip(self))]
    async fn ensure_bucket_exists(&self) -> Result<(), MinioError> {
        let bucket_exists_args = BucketExistsArgs::new(&self.config.bucket_name)
            .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;

        let exists = self.client.bucket_exists(&bucket_exists_args).await.map_err(|e| {
            error!("Failed to check if bucket exists: {}", e);
            MinioError::OperationError(format!("Bucket exists check failed: {}", e))
        })?;

        if exists {
            debug!("Bucket '{}' already exists", self.config.bucket_name);
            return Ok(());
        }

        warn!("Bucket '{}' does not exist, creating it", self.config.bucket_name);
        let make_bucket_args = MakeBucketArgs::new(&self.config.bucket_name)
            .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;

        self.client.make_bucket(&make_bucket_args).await.map_err(|e| {
            error!("Failed to create bucket '{}': {}", self.config.bucket_name, e);
            MinioError::OperationError(format!("Bucket creation failed: {}", e))
        })?;

        info!("Created bucket '{}'", self.config.bucket_name);
        Ok(())
    }

    #[instrument(skip(self, data), fields(object_name = %object_name, size = data.len()))]
    pub async fn put_object(&self, object_name: &str, data: Vec<u8>, content_type: Option<&str>) -> Result<(), MinioError> {
        info!("Uploading object '{}' to bucket '{}'", object_name, self.config.bucket_name);

        let bucket_name = self.config.bucket_name.clone();
        let object_name_owned = object_name.to_string();
        let client = self.client.clone();
        let content_type_owned = content_type.map(|ct| ct.to_string());

        // PutObjectArgs borrows the reader mutably and is not Send
        tokio::task::spawn_blocking(move || {
            let mut reader = Cursor::new(data);
            let data_len = reader.get_ref().len();
            let ct_holder = content_type_owned;

            let mut args = PutObjectArgs::new(&bucket_name, &object_name_owned, &mut reader, Some(data_len), None)
                .map_err(|e| MinioError::InvalidArguments(e.to_string()))?;

            if let Some(ref ct) = ct_holder {
                args.content_type = ct;
            }

            futures::executor::block_on(client.put_object(&mut args))
                .map_err(|e| MinioError::OperationError(format!("Upload failed: {}", e)))?;
            Ok::<(), MinioError>(())
        })
        .await
        .map_err(|e| {
            error!("Failed to join blocking task for put_object: {}", e);
            MinioError::OperationError(format!("Join error: {}", e))
        })??;

        info!("Uploaded object '{}'", object_name);
        Ok(())
    }

    /// Public link for an object: `<links_prefix>/<bucket>/<object>`
    pub fn generate_download_link(&self, object_name: &str) -> String {
        public_link(&self.config.links_prefix, &self.config.bucket_name, object_name)
    }
}

#[async_trait]
impl ImageHost for MinioService {
    async fn store_image(&self, object_name: &str, data: Vec<u8>, content_type: &str) -> Result<String, MinioError> {
        self.put_object(object_name, data, Some(content_type)).await?;
        Ok(self.generate_download_link(object_name))
    }
}

pub fn public_link(base_url: &str, bucket_name: &str, object_name: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), bucket_name, object_name)
}

#[derive(Debug, thiserror::Error)]
pub enum MinioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Operation error: {0}")]
    OperationError(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
