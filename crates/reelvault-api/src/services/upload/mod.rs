//! Upload services: the video ingestion pipeline and its simpler
//! thumbnail variant.

mod thumbnail;
mod video;

pub use thumbnail::ThumbnailUploadService;
pub use video::VideoIngestService;

use reelvault_core::AppError;
use reelvault_media::MediaToolError;
use reelvault_storage::StorageError;

/// Media tool failures are internal errors; the tool's stderr stays in the
/// logs, never in the response body.
fn tool_error(err: MediaToolError) -> AppError {
    AppError::MediaProcessing(err.to_string())
}

fn storage_error(err: StorageError) -> AppError {
    AppError::Storage(err.to_string())
}
