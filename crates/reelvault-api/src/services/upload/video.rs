//! Video ingestion pipeline: authorize → buffer → inspect → classify →
//! optimize → key → upload → commit.
//!
//! The pipeline is strictly sequential within a request; each stage depends
//! on the previous stage's output file. A failure at any stage aborts the
//! run with no record mutation. Every staging file lives in a
//! `tempfile` guard, so removal happens on every exit path.

use std::sync::Arc;

use bytes::Bytes;
use reelvault_core::constants::VIDEO_CONTENT_TYPE;
use reelvault_core::models::Video;
use reelvault_core::AppError;
use reelvault_db::VideoStore;
use reelvault_media::{classify_streams, ContainerOptimizer, MediaInspector};
use reelvault_storage::{generate_object_key, ObjectStorage};
use uuid::Uuid;

use super::{storage_error, tool_error};
use crate::state::AppState;
use crate::utils::upload::normalize_media_type;

pub struct VideoIngestService {
    videos: Arc<dyn VideoStore>,
    storage: Arc<dyn ObjectStorage>,
    inspector: Arc<dyn MediaInspector>,
    optimizer: Arc<dyn ContainerOptimizer>,
    max_upload_bytes: usize,
}

impl VideoIngestService {
    pub fn new(state: &AppState) -> Self {
        Self {
            videos: state.videos.clone(),
            storage: state.video_storage.clone(),
            inspector: state.inspector.clone(),
            optimizer: state.optimizer.clone(),
            max_upload_bytes: state.config.max_video_upload_bytes,
        }
    }

    #[cfg(test)]
    fn with_parts(
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        inspector: Arc<dyn MediaInspector>,
        optimizer: Arc<dyn ContainerOptimizer>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            videos,
            storage,
            inspector,
            optimizer,
            max_upload_bytes,
        }
    }

    /// Run the full ingestion pipeline for one uploaded video.
    ///
    /// On success the record's `video_url` points at the optimized copy and
    /// has been persisted. On any failure the record is untouched and all
    /// staging files are gone.
    pub async fn ingest(
        &self,
        video_id: Uuid,
        principal_id: Uuid,
        content_type: &str,
        data: Bytes,
    ) -> Result<Video, AppError> {
        // Authorize: the record must exist and belong to the caller.
        // A mismatch aborts here; nothing below runs for foreign records.
        let mut video = self
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

        if video.user_id != principal_id {
            return Err(AppError::Unauthorized(
                "You don't own this video".to_string(),
            ));
        }

        let media_type = normalize_media_type(content_type);
        if media_type != VIDEO_CONTENT_TYPE {
            return Err(AppError::UnsupportedMediaType(format!(
                "Only {} uploads are accepted, got {}",
                VIDEO_CONTENT_TYPE, media_type
            )));
        }

        // Bound the upload before any file IO.
        if data.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload of {} bytes exceeds the {} byte limit",
                data.len(),
                self.max_upload_bytes
            )));
        }

        tracing::info!(
            video_id = %video_id,
            user_id = %principal_id,
            size_bytes = data.len(),
            "Starting video ingestion"
        );

        // Buffer the upload to a staging file. The guard removes it on drop,
        // success and failure alike.
        let staging = tempfile::NamedTempFile::new()?;
        tokio::fs::write(staging.path(), &data).await?;

        let streams = self
            .inspector
            .inspect(staging.path())
            .await
            .map_err(tool_error)?;
        let orientation = classify_streams(&streams).map_err(tool_error)?;

        let optimized = self
            .optimizer
            .optimize(staging.path())
            .await
            .map_err(tool_error)?;
        // Same removal guarantee for the optimized copy.
        let optimized = tempfile::TempPath::from_path(optimized);

        let storage_key = generate_object_key(VIDEO_CONTENT_TYPE, Some(orientation.as_str()));

        let optimized_data = tokio::fs::read(&optimized).await?;
        self.storage
            .put_object(&storage_key, Bytes::from(optimized_data), VIDEO_CONTENT_TYPE)
            .await
            .map_err(storage_error)?;

        // Commit the URL only after the object is durably stored. If this
        // update fails the uploaded object is orphaned; that inconsistency
        // is accepted rather than compensated.
        let video_url = self.storage.public_url(&storage_key);
        video.video_url = Some(video_url.clone());
        self.videos.update_video(&video).await?;

        tracing::info!(
            video_id = %video_id,
            orientation = %orientation,
            storage_key = %storage_key,
            video_url = %video_url,
            "Video ingestion committed"
        );

        Ok(video)
    }
}
