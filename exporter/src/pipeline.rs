use crate::config::Config;
use crate::error::{Result, Stage, StageExt};
use crate::services::export_service::{assemble_entities, write_entities};
use crate::services::playlist_service::fetch_playlist_info;
use crate::services::video_service::fetch_playlist_videos;
use crate::services::youtube::YouTubeClient;
use log::debug;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub record_count: usize,
    pub video_count: usize,
}

/// Fetches the configured playlist and its videos and writes them as catalog entities.
///
/// Every stage must succeed before anything is written.
pub async fn run(config: &Config) -> Result<ExportSummary> {
    let client = YouTubeClient::new(config);

    let playlist = fetch_playlist_info(&client, &config.playlist_id).await?;
    let videos = fetch_playlist_videos(&client, &config.playlist_id).await?;
    let video_count = videos.len();

    let entities = assemble_entities(playlist, videos);
    write_entities(&config.output_path, &entities).during(Stage::OutputWrite)?;

    debug!(
        "Fetched YouTube data and saved {} records to {}",
        entities.len(),
        config.output_path.display()
    );

    Ok(ExportSummary {
        output_path: config.output_path.clone(),
        record_count: entities.len(),
        video_count,
    })
}
