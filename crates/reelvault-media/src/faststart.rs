//! Fast-start container optimization via ffmpeg.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::MediaToolError;
use crate::probe::validate_tool_path;

/// Suffix appended to the input path to form the optimized output path.
pub const FASTSTART_SUFFIX: &str = ".faststart.mp4";

/// Output path for the optimized copy of `input`.
pub fn faststart_output_path(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(FASTSTART_SUFFIX);
    PathBuf::from(os)
}

/// Container optimizer backed by the ffmpeg executable.
///
/// Streams are copied, not re-encoded: the remux only moves the metadata
/// boxes ahead of the media data so playback can begin before the full file
/// downloads.
pub struct FastStartOptimizer {
    ffmpeg_path: String,
}

impl FastStartOptimizer {
    pub fn new(ffmpeg_path: String) -> Result<Self, MediaToolError> {
        validate_tool_path(&ffmpeg_path)?;
        Ok(Self { ffmpeg_path })
    }
}

#[async_trait::async_trait]
impl crate::ContainerOptimizer for FastStartOptimizer {
    async fn optimize(&self, input: &Path) -> Result<PathBuf, MediaToolError> {
        let output_path = faststart_output_path(input);
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| MediaToolError::ToolExecution {
                tool: "ffmpeg",
                source,
            })?;

        if !output.status.success() {
            // No partial output survives a failed run.
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(MediaToolError::ToolFailed {
                tool: "ffmpeg",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::debug!(
            input = %input.display(),
            output = %output_path.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Rewrote container for fast start"
        );

        Ok(output_path)
    }
}
