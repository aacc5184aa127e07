//! Media tooling: stream inspection, orientation classification, and
//! fast-start container optimization.
//!
//! The external tools (`ffprobe`, `ffmpeg`) sit behind the narrow
//! [`MediaInspector`] and [`ContainerOptimizer`] traits so the upload
//! pipeline can be exercised with fakes instead of real child processes.

mod error;
mod faststart;
mod orientation;
mod probe;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use error::MediaToolError;
pub use faststart::{faststart_output_path, FastStartOptimizer, FASTSTART_SUFFIX};
pub use orientation::{classify_streams, Orientation};
pub use probe::{parse_probe_output, FfprobeInspector, MediaStreamInfo};

/// Inspect a local media file and describe its streams.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    async fn inspect(&self, path: &Path) -> Result<Vec<MediaStreamInfo>, MediaToolError>;
}

/// Rewrite a local MP4's container for streaming-friendly playback,
/// returning the path of the new file. The input file is never mutated.
#[async_trait]
pub trait ContainerOptimizer: Send + Sync {
    async fn optimize(&self, input: &Path) -> Result<PathBuf, MediaToolError>;
}
