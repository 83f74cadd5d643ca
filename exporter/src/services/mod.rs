pub mod export_service;
pub mod playlist_service;
pub mod video_service;
pub mod youtube;
