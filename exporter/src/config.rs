use crate::error::ExportError;
use env_logger::Builder;
use log::{info, LevelFilter};
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_PLAYLIST_ID: &str = "PL5ErBr2d3QJH0kbwTQ7HSuzvBb4zIWzhy";
pub const DEFAULT_OUTPUT_PATH: &str = "port_entities.json";
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Run configuration, loaded once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub playlist_id: String,
    pub output_path: PathBuf,
    pub api_base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>, playlist_id: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            playlist_id: playlist_id.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn from_env() -> Result<Self, ExportError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("YOUTUBE_API_KEY").ok_or_else(|| {
            ExportError::Auth("YOUTUBE_API_KEY environment variable must be set".to_string())
        })?;

        let api_base_url = get("YOUTUBE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let parsed = Url::parse(&api_base_url)
            .map_err(|e| ExportError::Config(format!("YOUTUBE_API_URL '{api_base_url}': {e}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExportError::Config(format!(
                "YOUTUBE_API_URL '{api_base_url}' must be an http(s) URL"
            )));
        }

        Ok(Config {
            api_key,
            playlist_id: get("YOUTUBE_PLAYLIST_ID")
                .unwrap_or_else(|| DEFAULT_PLAYLIST_ID.to_string()),
            output_path: PathBuf::from(
                get("OUTPUT_PATH").unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            ),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting YouTube playlist export...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}
