//! Video payloads.

use serde::{Deserialize, Serialize};

/// A single video resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: u64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub user: Option<VideoUser>,
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
    #[serde(default)]
    pub video_pictures: Vec<VideoPicture>,
}

/// The account that uploaded a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoUser {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// An encoded rendition of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFile {
    pub id: u64,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub link: String,
}

/// A preview frame of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPicture {
    pub id: u64,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub nr: u32,
}

/// One page of video results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
}
