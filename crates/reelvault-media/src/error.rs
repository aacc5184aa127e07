use thiserror::Error;

/// Errors from the external media tools and their output handling.
#[derive(Debug, Error)]
pub enum MediaToolError {
    /// The child process could not be spawned or awaited.
    #[error("failed to run {tool}: {source}")]
    ToolExecution {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The child process ran but exited unsuccessfully.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The captured output was not valid structured data.
    #[error("failed to decode {tool} output: {source}")]
    Decode {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The container holds no stream with codec type `video`.
    #[error("no video stream found")]
    NoVideoStream,

    /// The configured tool path contains characters we refuse to pass to a shellless spawn.
    #[error("invalid tool path: {0}")]
    InvalidToolPath(String),
}
