//! Router-level tests: the upload endpoints exercised over HTTP with fake
//! collaborators injected through the app state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use reelvault_api::auth::JwtService;
use reelvault_api::setup::routes::build_router;
use reelvault_api::state::AppState;
use reelvault_core::models::Video;
use reelvault_core::{AppError, Config};
use reelvault_db::VideoStore;
use reelvault_media::{
    faststart_output_path, ContainerOptimizer, MediaInspector, MediaStreamInfo, MediaToolError,
};
use reelvault_storage::{ObjectStorage, StorageError};

const JWT_SECRET: &str = "0123456789abcdef0123456789abcdef";

struct FakeVideoStore {
    videos: Mutex<HashMap<Uuid, Video>>,
}

impl FakeVideoStore {
    fn with_video(video: Video) -> Self {
        let mut map = HashMap::new();
        map.insert(video.id, video);
        Self {
            videos: Mutex::new(map),
        }
    }

    fn stored(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl VideoStore for FakeVideoStore {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.lock().unwrap().get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        self.videos
            .lock()
            .unwrap()
            .insert(video.id, video.clone());
        Ok(())
    }

    async fn create_video(
        &self,
        _user_id: Uuid,
        _title: &str,
        _description: Option<&str>,
    ) -> Result<Video, AppError> {
        unimplemented!("not exercised over HTTP")
    }
}

struct FakeObjectStorage {
    host: String,
    puts: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStorage for FakeObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        self.puts.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}/{}", self.host, key)
    }
}

struct FakeInspector;

#[async_trait]
impl MediaInspector for FakeInspector {
    async fn inspect(&self, _path: &Path) -> Result<Vec<MediaStreamInfo>, MediaToolError> {
        Ok(vec![MediaStreamInfo {
            codec_type: "video".to_string(),
            width: Some(1920),
            height: Some(1080),
            display_aspect_ratio: Some("16:9".to_string()),
        }])
    }
}

struct FakeOptimizer;

#[async_trait]
impl ContainerOptimizer for FakeOptimizer {
    async fn optimize(&self, input: &Path) -> Result<PathBuf, MediaToolError> {
        let output = faststart_output_path(input);
        tokio::fs::copy(input, &output)
            .await
            .map_err(|source| MediaToolError::ToolExecution {
                tool: "ffmpeg",
                source,
            })?;
        Ok(output)
    }
}

fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        database_url: "postgres://unused".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiry_hours: 24,
        s3_bucket: "reelvault-media".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        distribution_host: "cdn.test".to_string(),
        assets_root: std::env::temp_dir()
            .join("reelvault-test-assets")
            .to_string_lossy()
            .into_owned(),
        assets_base_url: "http://localhost:8080/assets".to_string(),
        max_video_upload_bytes: 1024 * 1024,
        max_thumbnail_upload_bytes: 64 * 1024,
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
    }
}

fn sample_video(owner: Uuid) -> Video {
    let now = Utc::now();
    Video {
        id: Uuid::new_v4(),
        user_id: owner,
        title: "clip".to_string(),
        description: None,
        video_url: None,
        thumbnail_url: None,
        created_at: now,
        updated_at: now,
    }
}

struct TestApp {
    router: Router,
    store: Arc<FakeVideoStore>,
    jwt: JwtService,
    video_id: Uuid,
    owner: Uuid,
}

fn test_app() -> TestApp {
    let owner = Uuid::new_v4();
    let video = sample_video(owner);
    let video_id = video.id;
    let store = Arc::new(FakeVideoStore::with_video(video));
    let jwt = JwtService::new(JWT_SECRET.to_string(), 24);

    let state = Arc::new(AppState {
        config: test_config(),
        videos: store.clone(),
        video_storage: Arc::new(FakeObjectStorage {
            host: "cdn.test".to_string(),
            puts: Mutex::new(Vec::new()),
        }),
        thumbnail_storage: Arc::new(FakeObjectStorage {
            host: "localhost:8080".to_string(),
            puts: Mutex::new(Vec::new()),
        }),
        inspector: Arc::new(FakeInspector),
        optimizer: Arc::new(FakeOptimizer),
        jwt: jwt.clone(),
    });

    TestApp {
        router: build_router(state).expect("router"),
        store,
        jwt,
        video_id,
        owner,
    }
}

const BOUNDARY: &str = "reelvault-test-boundary";

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).expect("request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn healthz_responds_ok() {
    let app = test_app();
    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn upload_without_token_is_401() {
    let app = test_app();
    let body = multipart_body("video", "clip.mp4", "video/mp4", b"mp4-bytes");
    let request = upload_request(&format!("/videos/{}/upload", app.video_id), None, body);

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_with_malformed_id_is_400() {
    let app = test_app();
    let token = app.jwt.create_token(app.owner).unwrap();
    let body = multipart_body("video", "clip.mp4", "video/mp4", b"mp4-bytes");
    let request = upload_request("/videos/not-a-uuid/upload", Some(&token), body);

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn successful_upload_returns_record_with_landscape_url() {
    let app = test_app();
    let token = app.jwt.create_token(app.owner).unwrap();
    let body = multipart_body("video", "clip.mp4", "video/mp4", b"mp4-bytes");
    let request = upload_request(
        &format!("/videos/{}/upload", app.video_id),
        Some(&token),
        body,
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let url = json["video_url"].as_str().expect("video_url");
    assert!(url.starts_with("https://cdn.test/landscape/"), "url: {}", url);
    assert!(url.ends_with(".mp4"));

    let stored = app.store.stored(app.video_id).expect("record");
    assert_eq!(stored.video_url.as_deref(), Some(url));
}

#[tokio::test]
async fn non_owner_gets_401_and_record_stays_unchanged() {
    let app = test_app();
    let intruder = app.jwt.create_token(Uuid::new_v4()).unwrap();
    let body = multipart_body("video", "clip.mp4", "video/mp4", b"mp4-bytes");
    let request = upload_request(
        &format!("/videos/{}/upload", app.video_id),
        Some(&intruder),
        body,
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.stored(app.video_id).unwrap().video_url, None);
}

#[tokio::test]
async fn non_mp4_video_is_415() {
    let app = test_app();
    let token = app.jwt.create_token(app.owner).unwrap();
    let body = multipart_body("video", "clip.webm", "video/webm", b"webm-bytes");
    let request = upload_request(
        &format!("/videos/{}/upload", app.video_id),
        Some(&token),
        body,
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn missing_video_field_is_422() {
    let app = test_app();
    let token = app.jwt.create_token(app.owner).unwrap();
    let body = multipart_body("wrong_field", "clip.mp4", "video/mp4", b"mp4-bytes");
    let request = upload_request(
        &format!("/videos/{}/upload", app.video_id),
        Some(&token),
        body,
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = response_json(response).await;
    assert_eq!(json["code"], "UNPROCESSABLE_FORM");
}

#[tokio::test]
async fn gif_thumbnail_is_415() {
    let app = test_app();
    let token = app.jwt.create_token(app.owner).unwrap();
    let body = multipart_body("thumbnail", "thumb.gif", "image/gif", b"gif-bytes");
    let request = upload_request(
        &format!("/videos/{}/thumbnail", app.video_id),
        Some(&token),
        body,
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(app.store.stored(app.video_id).unwrap().thumbnail_url, None);
}

#[tokio::test]
async fn png_thumbnail_commits_assets_url() {
    let app = test_app();
    let token = app.jwt.create_token(app.owner).unwrap();
    let body = multipart_body("thumbnail", "thumb.png", "image/png", b"png-bytes");
    let request = upload_request(
        &format!("/videos/{}/thumbnail", app.video_id),
        Some(&token),
        body,
    );

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let url = json["thumbnail_url"].as_str().expect("thumbnail_url");
    assert!(url.starts_with("https://localhost:8080/"), "url: {}", url);
    assert!(url.ends_with(".png"));
}
