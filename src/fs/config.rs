//! Object storage configuration.
//!
//! Credentials and most settings are read from the environment by the
//! `object_store` builders (`GOOGLE_SERVICE_ACCOUNT`, `AWS_ACCESS_KEY_ID`,
//! `AWS_REGION`, ...). [`StorageConfig`] only carries the explicit overrides.
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::fs::StorageConfig;
//!
//! let config = StorageConfig::default()
//!     .s3_endpoint("http://localhost:9000")
//!     .allow_http(true);
//! assert!(config.allow_http);
//! ```

use std::path::PathBuf;

/// Overrides applied on top of the environment when connecting to a bucket.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Service account key file used for `gs://` and `gcs://` buckets.
    pub gcs_service_account_path: Option<PathBuf>,
    /// Region of `s3://` buckets.
    pub s3_region: Option<String>,
    /// Custom S3-compatible endpoint (MinIO, LocalStack, ...).
    pub s3_endpoint: Option<String>,
    /// Allow plain HTTP endpoints.
    pub allow_http: bool,
}

impl StorageConfig {
    /// Set the GCS service account key file.
    pub fn gcs_service_account_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.gcs_service_account_path = Some(path.into());
        self
    }

    /// Set the S3 region.
    pub fn s3_region(mut self, region: impl Into<String>) -> Self {
        self.s3_region = Some(region.into());
        self
    }

    /// Set a custom S3 endpoint.
    pub fn s3_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.s3_endpoint = Some(endpoint.into());
        self
    }

    /// Allow or forbid plain HTTP endpoints.
    pub fn allow_http(mut self, allow: bool) -> Self {
        self.allow_http = allow;
        self
    }
}
