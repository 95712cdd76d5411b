//! Imagemap messages: an image with tappable areas and an optional video.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapMessage {
    /// Base URL of the image set (HTTPS, max 1000 characters).
    pub base_url: String,

    /// Max 400 characters.
    pub alt_text: String,

    pub base_size: ImagemapBaseSize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<ImagemapVideo>,

    /// Max 50 actions.
    pub actions: Vec<ImagemapAction>,
}

/// Size of the base image; width must be 1040.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImagemapBaseSize {
    pub width: i64,
    pub height: i64,
}

impl Default for ImagemapBaseSize {
    fn default() -> Self {
        Self {
            width: 1040,
            height: 1040,
        }
    }
}

/// A rectangle in base-image pixels; the origin is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImagemapArea {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ImagemapArea {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }
}

/// Action of one tappable area, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImagemapAction {
    Uri(ImagemapUriAction),
    Message(ImagemapMessageAction),
}

impl ImagemapAction {
    pub fn area(&self) -> &ImagemapArea {
        match self {
            ImagemapAction::Uri(a) => &a.area,
            ImagemapAction::Message(a) => &a.area,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapUriAction {
    /// Spoken by accessibility features (max 50 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub link_uri: String,

    pub area: ImagemapArea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapMessageAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Max 400 characters.
    pub text: String,

    pub area: ImagemapArea,
}

/// A video played over part of the imagemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapVideo {
    pub original_content_url: String,
    pub preview_image_url: String,
    pub area: ImagemapArea,
    pub external_link: ImagemapExternalLink,
}

/// Link label displayed after the video finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagemapExternalLink {
    pub link_uri: String,
    /// Max 30 characters.
    pub label: String,
}
