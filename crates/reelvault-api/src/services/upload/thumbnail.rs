//! Thumbnail upload: the simpler variant of the pipeline. Bytes go straight
//! to the local storage backend under a random key; no inspection or
//! transcoding.

use std::sync::Arc;

use bytes::Bytes;
use reelvault_core::constants::THUMBNAIL_CONTENT_TYPES;
use reelvault_core::models::Video;
use reelvault_core::AppError;
use reelvault_db::VideoStore;
use reelvault_storage::{generate_object_key, ObjectStorage};
use uuid::Uuid;

use super::storage_error;
use crate::state::AppState;
use crate::utils::upload::normalize_media_type;

pub struct ThumbnailUploadService {
    videos: Arc<dyn VideoStore>,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
}

impl ThumbnailUploadService {
    pub fn new(state: &AppState) -> Self {
        Self {
            videos: state.videos.clone(),
            storage: state.thumbnail_storage.clone(),
            max_upload_bytes: state.config.max_thumbnail_upload_bytes,
        }
    }

    #[cfg(test)]
    fn with_parts(
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            videos,
            storage,
            max_upload_bytes,
        }
    }

    /// Store a thumbnail and persist its URL on the video record.
    pub async fn upload(
        &self,
        video_id: Uuid,
        principal_id: Uuid,
        content_type: &str,
        data: Bytes,
    ) -> Result<Video, AppError> {
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
        if !THUMBNAIL_CONTENT_TYPES.contains(&media_type.as_str()) {
            return Err(AppError::UnsupportedMediaType(format!(
                "Unsupported thumbnail type {}, allowed: {}",
                media_type,
                THUMBNAIL_CONTENT_TYPES.join(", ")
            )));
        }

        if data.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Thumbnail of {} bytes exceeds the {} byte limit",
                data.len(),
                self.max_upload_bytes
            )));
        }

        let storage_key = generate_object_key(&media_type, None);
        self.storage
            .put_object(&storage_key, data, &media_type)
            .await
            .map_err(storage_error)?;

        let thumbnail_url = self.storage.public_url(&storage_key);
        video.thumbnail_url = Some(thumbnail_url.clone());
        self.videos.update_video(&video).await?;

        tracing::info!(
            video_id = %video_id,
            thumbnail_url = %thumbnail_url,
            "Thumbnail stored"
        );

        Ok(video)
    }
}
