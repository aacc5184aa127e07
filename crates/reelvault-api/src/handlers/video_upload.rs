use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use reelvault_core::constants::VIDEO_FORM_FIELD;
use reelvault_core::models::VideoResponse;
use reelvault_core::AppError;
use uuid::Uuid;

use crate::auth;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::VideoIngestService;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_field;

#[utoipa::path(
    post,
    path = "/videos/{video_id}/upload",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Target video record")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video ingested; record carries the playable URL", body = VideoResponse),
        (status = 400, description = "Malformed video ID", body = ErrorResponse),
        (status = 401, description = "Missing/invalid token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video record not found", body = ErrorResponse),
        (status = 415, description = "Content type is not video/mp4", body = ErrorResponse),
        (status = 422, description = "Unprocessable multipart form", body = ErrorResponse),
        (status = 500, description = "Tooling or storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::InvalidInput("Invalid video ID".to_string()))?;

    let token = auth::extract_bearer_token(&headers)?;
    let user_id = state.jwt.validate_token(&token)?;

    let (data, content_type) = extract_multipart_field(multipart, VIDEO_FORM_FIELD).await?;

    let service = VideoIngestService::new(&state);
    let video = service.ingest(video_id, user_id, &content_type, data).await?;

    Ok(Json(VideoResponse::from(video)))
}
