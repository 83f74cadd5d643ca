use std::fmt;
use thiserror::Error;

/// Failure categories of an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Missing, blank or rejected API key
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Quota or rate limit rejection by the API
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Connectivity problems or timeouts
    #[error("Network error: {0}")]
    TransientNetwork(String),

    /// The requested resource does not exist or is not accessible
    #[error("Not found: {0}")]
    NotFound(String),

    /// A playlist item references a deleted or private video
    #[error("Video {video_id} is missing or no longer accessible")]
    MissingVideo { video_id: String },

    #[error("Missing field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Malformed field '{field}' in {context}: {value}")]
    MalformedField {
        field: String,
        context: String,
        value: String,
    },

    /// Any other non-success response
    #[error("YouTube API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ExportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ExportError::TransientNetwork(e.to_string())
        } else if e.is_decode() {
            ExportError::Parse(e.to_string())
        } else {
            ExportError::Upstream {
                status: e.status().map(|s| s.as_u16()).unwrap_or_default(),
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Parse(e.to_string())
    }
}

/// The pipeline step an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PlaylistInfo,
    ItemEnumeration,
    VideoEnrichment,
    OutputWrite,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PlaylistInfo => "playlist info fetch",
            Stage::ItemEnumeration => "playlist item enumeration",
            Stage::VideoEnrichment => "video enrichment",
            Stage::OutputWrite => "output write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{stage} failed")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: ExportError,
}

pub trait StageExt<T> {
    fn during(self, stage: Stage) -> Result<T>;
}

impl<T, E: Into<ExportError>> StageExt<T> for std::result::Result<T, E> {
    fn during(self, stage: Stage) -> Result<T> {
        self.map_err(|e| PipelineError {
            stage,
            source: e.into(),
        })
    }
}

/// Result type for pipeline stages.
pub type Result<T> = std::result::Result<T, PipelineError>;
