use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Blueprint {
    YoutubePlaylist,
    YoutubeVideo,
}

/// One catalog record. Playlist and video records share this envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub identifier: String,
    pub blueprint: Blueprint,
    pub title: String,
    pub properties: Properties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Relations>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    Video(VideoProperties),
    Playlist(PlaylistProperties),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relations {
    /// Identifier of the owning playlist record.
    pub playlist: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistProperties {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: String,
    pub channel_id: String,
    pub channel_title: String,
    pub thumbnails: PlaylistThumbnails,
    pub localized: Localized,
}

/// Missing variants are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistThumbnails {
    pub default: String,
    pub medium: String,
    pub high: String,
    pub standard: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProperties {
    pub title: String,
    pub duration: String,
    pub link: String,
    pub description: String,
    pub published_at: String,
    pub position: Option<u64>,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub thumbnails: VideoThumbnails,
    pub video_owner_channel_title: String,
    pub video_owner_channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoThumbnails {
    pub default: String,
    pub medium: String,
    pub high: String,
    pub standard: Option<String>,
}

impl Entity {
    pub fn playlist(playlist_id: &str, properties: PlaylistProperties) -> Self {
        Entity {
            identifier: playlist_id.to_string(),
            blueprint: Blueprint::YoutubePlaylist,
            title: properties.title.clone(),
            properties: Properties::Playlist(properties),
            relations: None,
        }
    }

    pub fn video(video_id: &str, playlist_id: &str, properties: VideoProperties) -> Self {
        Entity {
            identifier: video_id.to_string(),
            blueprint: Blueprint::YoutubeVideo,
            title: properties.title.clone(),
            properties: Properties::Video(properties),
            relations: Some(Relations {
                playlist: playlist_id.to_string(),
            }),
        }
    }
}

pub fn playlist_link(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={playlist_id}")
}

pub fn video_link(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
