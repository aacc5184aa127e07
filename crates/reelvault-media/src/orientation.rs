//! Orientation classification from probed stream metadata.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::MediaToolError;
use crate::probe::MediaStreamInfo;

/// Orientation class of a video, derived from its display aspect ratio.
/// Only ever embedded into storage keys, never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Classify the first video stream's display aspect ratio.
///
/// The mapping is exact-string: `16:9` is landscape, `9:16` is portrait,
/// anything else (including an absent ratio) is `other`. A container with
/// no video stream at all is an error; the content-type check upstream
/// guarantees an MP4, but not that it holds decodable video.
pub fn classify_streams(streams: &[MediaStreamInfo]) -> Result<Orientation, MediaToolError> {
    let video = streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or(MediaToolError::NoVideoStream)?;

    Ok(match video.display_aspect_ratio.as_deref() {
        Some("16:9") => Orientation::Landscape,
        Some("9:16") => Orientation::Portrait,
        _ => Orientation::Other,
    })
}
