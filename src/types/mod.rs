//! Decoded payload types for the photo and video endpoint families.
//!
//! The resilience core moves `serde_json::Value` around and never looks
//! inside; these types are the documented schema the typed endpoint layer
//! decodes into. Fields the provider sometimes omits are defaulted so a
//! sparse payload still decodes.

mod photo;
mod video;

pub use photo::{Photo, PhotoPage, PhotoSrc};
pub use video::{Video, VideoFile, VideoPage, VideoPicture, VideoUser};
