use crate::error::{ExportError, Result, Stage, StageExt};
use crate::models::{playlist_link, Entity, Localized, PlaylistProperties, PlaylistThumbnails};
use crate::services::youtube::YouTubeClient;
use crate::utils::thumbnail_url;
use log::info;
use serde_json::Value;

const NO_TITLE: &str = "No Title";
const NO_DESCRIPTION: &str = "No description available";
const NO_LOCALIZED_TITLE: &str = "No Localized Title";
const NO_LOCALIZED_DESCRIPTION: &str = "No Localized Description";

/// Fetches the playlist's own metadata and shapes it into the playlist record.
pub async fn fetch_playlist_info(client: &YouTubeClient, playlist_id: &str) -> Result<Entity> {
    info!("Fetching playlist info for {playlist_id}");

    let response = client
        .list_playlists(playlist_id)
        .await
        .during(Stage::PlaylistInfo)?;

    // An unknown id comes back as an empty item list, not as an error status.
    let item = response["items"]
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| ExportError::NotFound(format!("playlist {playlist_id} has no items")))
        .during(Stage::PlaylistInfo)?;

    let entity = playlist_entity(playlist_id, item).during(Stage::PlaylistInfo)?;
    info!("Playlist: {} ({})", entity.title, playlist_id);
    Ok(entity)
}

fn playlist_entity(playlist_id: &str, item: &Value) -> std::result::Result<Entity, ExportError> {
    let snippet = &item["snippet"];
    let context = format!("playlist {playlist_id}");
    let text = |field: &str| snippet[field].as_str().unwrap_or("").to_string();

    let description = match snippet["description"].as_str().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => NO_DESCRIPTION.to_string(),
    };

    let thumbnails = &snippet["thumbnails"];
    let thumbnail =
        |variant: &str| thumbnail_url(thumbnails, variant, &context).map(Option::unwrap_or_default);

    let localized = &snippet["localized"];

    Ok(Entity::playlist(
        playlist_id,
        PlaylistProperties {
            title: snippet["title"].as_str().unwrap_or(NO_TITLE).to_string(),
            link: playlist_link(playlist_id),
            description,
            published_at: text("publishedAt"),
            channel_id: text("channelId"),
            channel_title: text("channelTitle"),
            thumbnails: PlaylistThumbnails {
                default: thumbnail("default")?,
                medium: thumbnail("medium")?,
                high: thumbnail("high")?,
                standard: thumbnail("standard")?,
            },
            localized: Localized {
                title: localized["title"]
                    .as_str()
                    .unwrap_or(NO_LOCALIZED_TITLE)
                    .to_string(),
                description: localized["description"]
                    .as_str()
                    .unwrap_or(NO_LOCALIZED_DESCRIPTION)
                    .to_string(),
            },
        },
    ))
}
