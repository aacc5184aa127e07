//! Stream inspection via ffprobe.

use std::path::Path;
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;

use crate::error::MediaToolError;

/// One decoded stream as reported by the inspection tool.
///
/// Width/height/aspect ratio are absent for non-video streams, so every
/// field beyond the codec type is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MediaStreamInfo {
    #[serde(default)]
    pub codec_type: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub display_aspect_ratio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<MediaStreamInfo>,
}

/// Validate that a configured tool path doesn't contain shell metacharacters.
/// The spawn is shellless, but a path like `ffprobe;rm` is a config error we
/// want to reject loudly at startup rather than at request time.
pub(crate) fn validate_tool_path(path: &str) -> Result<(), MediaToolError> {
    let dangerous = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.is_empty() || path.chars().any(|c| dangerous.contains(&c)) {
        return Err(MediaToolError::InvalidToolPath(path.to_string()));
    }
    Ok(())
}

/// Parse the tool's captured stdout into stream descriptors.
pub fn parse_probe_output(stdout: &[u8]) -> Result<Vec<MediaStreamInfo>, MediaToolError> {
    let parsed: ProbeOutput =
        serde_json::from_slice(stdout).map_err(|source| MediaToolError::Decode {
            tool: "ffprobe",
            source,
        })?;
    Ok(parsed.streams)
}

/// Media inspector backed by the ffprobe executable.
pub struct FfprobeInspector {
    ffprobe_path: String,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: String) -> Result<Self, MediaToolError> {
        validate_tool_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }

    /// Run ffprobe with error-only verbosity so stdout carries nothing but
    /// the JSON document.
    async fn run(&self, path: &Path) -> Result<Vec<u8>, MediaToolError> {
        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| MediaToolError::ToolExecution {
                tool: "ffprobe",
                source,
            })?;

        if !output.status.success() {
            return Err(MediaToolError::ToolFailed {
                tool: "ffprobe",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait::async_trait]
impl crate::MediaInspector for FfprobeInspector {
    async fn inspect(&self, path: &Path) -> Result<Vec<MediaStreamInfo>, MediaToolError> {
        let start = std::time::Instant::now();
        let stdout = self.run(path).await?;
        let streams = parse_probe_output(&stdout)?;

        tracing::debug!(
            path = %path.display(),
            stream_count = streams.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Probed media file"
        );

        Ok(streams)
    }
}
