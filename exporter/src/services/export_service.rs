use crate::error::ExportError;
use crate::models::Entity;
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Playlist record first, then the videos in playlist order.
pub fn assemble_entities(playlist: Entity, videos: Vec<Entity>) -> Vec<Entity> {
    let mut all = Vec::with_capacity(videos.len() + 1);
    all.push(playlist);
    all.extend(videos);
    all
}

pub fn to_json(entities: &[Entity]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    entities.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Replaces `path` with the serialized entities.
///
/// The document is written next to the destination first and then renamed over it, so a
/// failed write leaves any previous file untouched.
pub fn write_entities(path: &Path, entities: &[Entity]) -> Result<(), ExportError> {
    let json = to_json(entities)?;
    let tmp_path = temp_path(path);

    if let Err(e) = fs::write(&tmp_path, &json) {
        fs::remove_file(&tmp_path).ok();
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        fs::remove_file(&tmp_path).ok();
        return Err(e.into());
    }

    debug!(
        "Wrote {} records ({} bytes) to {}",
        entities.len(),
        json.len(),
        path.display()
    );
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("entities"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Localized, PlaylistProperties, PlaylistThumbnails};

    fn playlist() -> Entity {
        Entity::playlist(
            "PL1",
            PlaylistProperties {
                title: "List".to_string(),
                link: "https://www.youtube.com/playlist?list=PL1".to_string(),
                description: "No description available".to_string(),
                published_at: String::new(),
                channel_id: String::new(),
                channel_title: String::new(),
                thumbnails: PlaylistThumbnails::default(),
                localized: Localized {
                    title: "No Localized Title".to_string(),
                    description: "No Localized Description".to_string(),
                },
            },
        )
    }

    #[test]
    fn test_four_space_indent() {
        let json = String::from_utf8(to_json(&[playlist()]).unwrap()).unwrap();

        assert!(json.starts_with("[\n    {\n        \"identifier\": \"PL1\","));
        assert!(json.ends_with("}\n]"));
    }

    #[test]
    fn test_non_ascii_is_written_as_utf8() {
        let mut entity = playlist();
        entity.title = "Café 🎵".to_string();

        let json = String::from_utf8(to_json(&[entity]).unwrap()).unwrap();

        assert!(json.contains("\"title\": \"Café 🎵\""));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_write_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port_entities.json");
        fs::write(&path, "stale contents").unwrap();

        write_entities(&path, &assemble_entities(playlist(), Vec::new())).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 1);
        assert_eq!(written[0]["identifier"], "PL1");
        assert!(!dir.path().join("port_entities.json.tmp").exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("port_entities.json");

        let result = write_entities(&path, &[playlist()]);
        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(!path.exists());
    }
}
