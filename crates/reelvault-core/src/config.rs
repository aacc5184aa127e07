//! Configuration module
//!
//! Environment-driven configuration for the API server: database, object
//! storage, authentication, media tooling, and upload limits. Values are
//! read once at startup via [`Config::from_env`] and validated before the
//! server binds.

use std::env;

use crate::constants::{MAX_THUMBNAIL_UPLOAD_BYTES, MAX_VIDEO_UPLOAD_BYTES};

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    // Database
    pub database_url: String,
    // Auth
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    // Object storage (videos)
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>,
    /// Public host serving uploaded videos (e.g. a CDN distribution domain).
    /// Committed URLs are `https://{distribution_host}/{storage_key}`.
    pub distribution_host: String,
    // Local storage (thumbnails)
    pub assets_root: String,
    pub assets_base_url: String,
    // Upload limits
    pub max_video_upload_bytes: usize,
    pub max_thumbnail_upload_bytes: usize,
    // Media tooling
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best-effort .env loading; real environment wins.
        dotenvy::dotenv().ok();

        let server_port: u16 = parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?;

        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let assets_base_url = env::var("ASSETS_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/assets", server_port));

        Ok(Config {
            server_port,
            environment: env_or("ENVIRONMENT", "development"),
            cors_origins,
            database_url: env_or("DATABASE_URL", ""),
            jwt_secret: env_or("JWT_SECRET", ""),
            jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
            s3_bucket: env_or("S3_BUCKET", ""),
            s3_region: env_or("S3_REGION", "us-east-1"),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            distribution_host: env_or("DISTRIBUTION_HOST", ""),
            assets_root: env_or("ASSETS_ROOT", "./assets"),
            assets_base_url,
            max_video_upload_bytes: parse_env("MAX_VIDEO_UPLOAD_BYTES", MAX_VIDEO_UPLOAD_BYTES)?,
            max_thumbnail_upload_bytes: parse_env(
                "MAX_THUMBNAIL_UPLOAD_BYTES",
                MAX_THUMBNAIL_UPLOAD_BYTES,
            )?,
            ffmpeg_path: env_or("FFMPEG_PATH", "ffmpeg"),
            ffprobe_path: env_or("FFPROBE_PATH", "ffprobe"),
        })
    }

    /// Check required settings; called once at startup before serving.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.is_empty() {
            anyhow::bail!("DATABASE_URL must be set");
        }
        if self.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must be set");
        }
        if self.jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters");
        }
        if self.s3_bucket.is_empty() {
            anyhow::bail!("S3_BUCKET must be set");
        }
        if self.distribution_host.is_empty() {
            anyhow::bail!("DISTRIBUTION_HOST must be set");
        }
        if self.max_video_upload_bytes == 0 {
            anyhow::bail!("MAX_VIDEO_UPLOAD_BYTES must be greater than zero");
        }
        if self.max_thumbnail_upload_bytes == 0 {
            anyhow::bail!("MAX_THUMBNAIL_UPLOAD_BYTES must be greater than zero");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
