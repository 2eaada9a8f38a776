//! Photo payloads.

use serde::{Deserialize, Serialize};

/// A single photo resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub photographer_url: String,
    #[serde(default)]
    pub photographer_id: u64,
    #[serde(default)]
    pub avg_color: Option<String>,
    #[serde(default)]
    pub src: PhotoSrc,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Download URLs for the size variants of a photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSrc {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub large2x: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub portrait: Option<String>,
    #[serde(default)]
    pub landscape: Option<String>,
    #[serde(default)]
    pub tiny: Option<String>,
}

/// One page of photo results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub photos: Vec<Photo>,
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
