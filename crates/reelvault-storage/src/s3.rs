use crate::traits::{ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
#[allow(unused_imports)]
use object_store::{Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload};

/// S3 storage implementation
///
/// Objects are written to the configured bucket; public URLs point at the
/// configured distribution host rather than the bucket endpoint, so the
/// committed URL stays stable regardless of which S3-compatible provider
/// backs the bucket.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    distribution_host: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `distribution_host` - Public host serving the bucket's objects
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        distribution_host: String,
    ) -> StorageResult<Self> {
        // Credentials come from the environment, as the SDK conventions expect.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            distribution_host,
        })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        let size = data.len() as u64;
        let location = Path::from(key.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(data), opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_url_for(&self.distribution_host, key)
    }
}

fn public_url_for(distribution_host: &str, key: &str) -> String {
    format!("https://{}/{}", distribution_host, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_uses_distribution_host() {
        assert_eq!(
            public_url_for("dxxxxxxxx.cloudfront.net", "landscape/abc123.mp4"),
            "https://dxxxxxxxx.cloudfront.net/landscape/abc123.mp4"
        );
    }
}
