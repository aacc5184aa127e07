//! Application state.
//!
//! Collaborators are held as trait objects so the handlers and services can
//! run against fakes in tests: the record store, both storage backends, and
//! the two media tools.

use std::sync::Arc;

use reelvault_core::Config;
use reelvault_db::VideoStore;
use reelvault_media::{ContainerOptimizer, MediaInspector};
use reelvault_storage::ObjectStorage;

use crate::auth::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoStore>,
    /// Remote object storage for optimized videos.
    pub video_storage: Arc<dyn ObjectStorage>,
    /// Local storage for thumbnails, served under `/assets`.
    pub thumbnail_storage: Arc<dyn ObjectStorage>,
    pub inspector: Arc<dyn MediaInspector>,
    pub optimizer: Arc<dyn ContainerOptimizer>,
    pub jwt: JwtService,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
