use crate::config::Config;
use crate::error::ExportError;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Maximum number of playlist items requested per page.
pub const PAGE_SIZE: u32 = 10;

const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "rateLimitExceeded",
    "dailyLimitExceeded",
    "userRateLimitExceeded",
];

const AUTH_REASONS: &[&str] = &[
    "keyInvalid",
    "keyExpired",
    "forbidden",
    "accessNotConfigured",
];

// Private or otherwise hidden resources, not credential problems.
const NOT_ACCESSIBLE_REASONS: &[&str] = &["playlistItemsNotAccessible", "playlistForbidden"];

/// Thin client over the three YouTube Data API list operations the export needs.
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Self {
        YouTubeClient {
            http: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    // Documentation: https://developers.google.com/youtube/v3/docs/playlists/list
    pub async fn list_playlists(&self, playlist_id: &str) -> Result<Value, ExportError> {
        self.get(
            "playlists",
            &[("part", "snippet,contentDetails"), ("id", playlist_id)],
        )
        .await
    }

    // Documentation: https://developers.google.com/youtube/v3/docs/playlistItems/list
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<Value, ExportError> {
        let max_results = PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        self.get("playlistItems", &query).await
    }

    // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
    pub async fn list_videos(&self, video_id: &str) -> Result<Value, ExportError> {
        self.get("videos", &[("part", "contentDetails,statistics"), ("id", video_id)])
            .await
    }

    async fn get(&self, resource: &str, query: &[(&str, &str)]) -> Result<Value, ExportError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("GET {url} {query:?}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }
}

/// Maps a non-success API response to an error category.
pub fn classify_error(status: StatusCode, body: &str) -> ExportError {
    let parsed: Value = serde_json::from_str(body).unwrap_or_default();
    let error = &parsed["error"];
    let message = error["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());
    let reasons: Vec<&str> = error["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e["reason"].as_str()).collect())
        .unwrap_or_default();
    let has_reason = |known: &[&str]| reasons.iter().any(|r| known.contains(r));

    match status {
        StatusCode::TOO_MANY_REQUESTS => ExportError::QuotaExceeded(message),
        StatusCode::FORBIDDEN if has_reason(QUOTA_REASONS) => {
            ExportError::QuotaExceeded(message)
        }
        StatusCode::FORBIDDEN if has_reason(NOT_ACCESSIBLE_REASONS) => {
            ExportError::NotFound(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExportError::Auth(message),
        StatusCode::BAD_REQUEST if has_reason(AUTH_REASONS) || is_invalid_key(error) => {
            ExportError::Auth(message)
        }
        StatusCode::NOT_FOUND => ExportError::NotFound(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ExportError::TransientNetwork(message)
        }
        _ => ExportError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}

// A rejected key is a generic `badRequest`; only the details or the message name the key.
fn is_invalid_key(error: &Value) -> bool {
    let in_details = error["details"].as_array().is_some_and(|details| {
        details
            .iter()
            .any(|d| d["reason"].as_str() == Some("API_KEY_INVALID"))
    });
    let bad_request_on_key = error["errors"].as_array().is_some_and(|errors| {
        errors.iter().any(|e| {
            e["reason"].as_str() == Some("badRequest")
                && e["message"]
                    .as_str()
                    .or(error["message"].as_str())
                    .is_some_and(|m| m.to_lowercase().contains("api key"))
        })
    });

    in_details || bad_request_on_key
}
