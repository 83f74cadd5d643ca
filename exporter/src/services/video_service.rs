use crate::error::{ExportError, Result, Stage, StageExt};
use crate::models::{video_link, Entity, VideoProperties, VideoThumbnails};
use crate::services::youtube::YouTubeClient;
use crate::utils::{convert_duration, parse_count, required_str, required_thumbnail, thumbnail_url};
use log::{debug, info};
use serde_json::Value;

// Returns the video records of a playlist, in playlist order.
pub async fn fetch_playlist_videos(
    client: &YouTubeClient,
    playlist_id: &str,
) -> Result<Vec<Entity>> {
    let mut videos = Vec::new();
    let mut next_page_token: Option<String> = None;
    let mut page = 0;

    loop {
        page += 1;
        let response = client
            .list_playlist_items(playlist_id, next_page_token.as_deref())
            .await
            .during(Stage::ItemEnumeration)?;

        let items = response["items"].as_array().map(Vec::as_slice).unwrap_or_default();
        debug!("Page {page}: {} playlist items", items.len());

        for item in items {
            let video_id = required_str(&item["contentDetails"], "videoId", "playlist item")
                .during(Stage::ItemEnumeration)?;

            // One detail lookup per item.
            let details = client
                .list_videos(video_id)
                .await
                .during(Stage::VideoEnrichment)?;
            let details = details["items"]
                .as_array()
                .and_then(|items| items.first())
                .ok_or_else(|| ExportError::MissingVideo {
                    video_id: video_id.to_string(),
                })
                .during(Stage::VideoEnrichment)?;

            let entity =
                video_entity(playlist_id, video_id, item, details).during(Stage::VideoEnrichment)?;
            debug!("Fetched video {video_id}: {}", entity.title);
            videos.push(entity);
        }

        // Check for next page
        match response["nextPageToken"].as_str() {
            Some(token) if !token.is_empty() => next_page_token = Some(token.to_string()),
            _ => break,
        }
    }

    info!("Found {} videos in playlist across {page} pages", videos.len());
    Ok(videos)
}

fn video_entity(
    playlist_id: &str,
    video_id: &str,
    item: &Value,
    details: &Value,
) -> std::result::Result<Entity, ExportError> {
    let snippet = &item["snippet"];
    let statistics = &details["statistics"];
    let thumbnails = &snippet["thumbnails"];
    let context = format!("video {video_id}");

    let title = required_str(snippet, "title", &context)?.to_string();
    let duration = details["contentDetails"]["duration"].as_str().unwrap_or("");

    Ok(Entity::video(
        video_id,
        playlist_id,
        VideoProperties {
            duration: convert_duration(duration),
            link: video_link(video_id),
            description: snippet["description"].as_str().unwrap_or("").to_string(),
            published_at: required_str(snippet, "publishedAt", &context)?.to_string(),
            position: snippet["position"].as_u64(),
            likes: parse_count(statistics, "likeCount", &context)?,
            views: parse_count(statistics, "viewCount", &context)?,
            comments: parse_count(statistics, "commentCount", &context)?,
            thumbnails: VideoThumbnails {
                default: required_thumbnail(thumbnails, "default", &context)?,
                medium: required_thumbnail(thumbnails, "medium", &context)?,
                high: required_thumbnail(thumbnails, "high", &context)?,
                standard: thumbnail_url(thumbnails, "standard", &context)?,
            },
            video_owner_channel_title: snippet["videoOwnerChannelTitle"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            video_owner_channel_id: snippet["videoOwnerChannelId"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            title,
        },
    ))
}
