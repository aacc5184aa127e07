//! Application wiring: collaborators, state, and routes.

pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::Router;
use reelvault_core::Config;
use reelvault_db::{VideoRepository, VideoStore};
use reelvault_media::{
    ContainerOptimizer, FastStartOptimizer, FfprobeInspector, MediaInspector,
};
use reelvault_storage::{LocalStorage, ObjectStorage, S3Storage};

use crate::auth::JwtService;
use crate::state::AppState;

/// Build all collaborators and the router from validated configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    config.validate()?;

    let pool = reelvault_db::connect(&config.database_url).await?;
    reelvault_db::run_migrations(&pool).await?;

    let videos: Arc<dyn VideoStore> = Arc::new(VideoRepository::new(pool));

    let video_storage: Arc<dyn ObjectStorage> = Arc::new(S3Storage::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
        config.distribution_host.clone(),
    )?);

    let thumbnail_storage: Arc<dyn ObjectStorage> = Arc::new(
        LocalStorage::new(&config.assets_root, config.assets_base_url.clone()).await?,
    );

    let inspector: Arc<dyn MediaInspector> =
        Arc::new(FfprobeInspector::new(config.ffprobe_path.clone())?);
    let optimizer: Arc<dyn ContainerOptimizer> =
        Arc::new(FastStartOptimizer::new(config.ffmpeg_path.clone())?);

    let jwt = JwtService::new(config.jwt_secret.clone(), config.jwt_expiry_hours);

    let state = Arc::new(AppState {
        config,
        videos,
        video_storage,
        thumbnail_storage,
        inspector,
        optimizer,
        jwt,
    });

    let router = routes::build_router(state.clone())?;
    Ok((state, router))
}
