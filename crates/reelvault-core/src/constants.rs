//! Domain constants shared across crates.

/// The only content type accepted by the video upload pipeline.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Content types accepted by the thumbnail upload handler.
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Upper bound on a video upload body. Requests beyond this are rejected
/// before any file IO happens.
pub const MAX_VIDEO_UPLOAD_BYTES: usize = 1024 * 1024 * 1024; // 1 GiB

/// Upper bound on a thumbnail upload body.
pub const MAX_THUMBNAIL_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10 MiB

/// Multipart field carrying the video file.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Multipart field carrying the thumbnail file.
pub const THUMBNAIL_FORM_FIELD: &str = "thumbnail";
