//! Video repository
//!
//! The [`VideoStore`] trait is the record-store contract the upload pipeline
//! depends on; [`VideoRepository`] is its Postgres implementation. Both
//! operations are single statements, so each is atomic from the pipeline's
//! point of view.

use async_trait::async_trait;
use reelvault_core::models::Video;
use reelvault_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, video_url, thumbnail_url, created_at, updated_at";

/// Record-store contract for video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist the mutable fields of an existing record.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;

    async fn create_video(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Video, AppError>;
}

/// Postgres-backed video repository.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE videos
             SET title = $2, description = $3, video_url = $4, thumbnail_url = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_url)
        .bind(&video.thumbnail_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Video {} not found", video.id)));
        }

        tracing::debug!(video_id = %video.id, "Video record updated");
        Ok(())
    }

    async fn create_video(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Video, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "INSERT INTO videos (user_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {}",
            VIDEO_COLUMNS
        ))
        .bind(user_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(video_id = %video.id, user_id = %user_id, "Video record created");
        Ok(video)
    }
}
