use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelvault API",
        description = "Video upload and ingestion service"
    ),
    paths(
        crate::handlers::video_upload::upload_video,
        crate::handlers::thumbnail_upload::upload_thumbnail,
    ),
    components(schemas(
        reelvault_core::models::VideoResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "videos", description = "Video upload and ingestion")
    )
)]
pub struct ApiDoc;
