//! Template messages: predefined layouts with action buttons.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::TemplateAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessage {
    /// Max 400 characters.
    pub alt_text: String,

    pub template: Template,
}

/// A template layout, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Template {
    Buttons(ButtonsTemplate),
    Confirm(ConfirmTemplate),
    Carousel(CarouselTemplate),
    ImageCarousel(ImageCarouselTemplate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageAspectRatio {
    /// 1.51:1
    Rectangle,
    /// 1:1
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Cover,
    Contain,
}

/// Image, title, text and up to four action buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ButtonsTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<ImageAspectRatio>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_background_color: Option<String>,

    /// Max 40 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Max 160 characters, or 60 with an image or title.
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<TemplateAction>,

    pub actions: Vec<TemplateAction>,
}

impl ButtonsTemplate {
    pub fn new(text: impl Into<String>, actions: Vec<TemplateAction>) -> Self {
        Self {
            thumbnail_image_url: None,
            image_aspect_ratio: None,
            image_size: None,
            image_background_color: None,
            title: None,
            text: text.into(),
            default_action: None,
            actions,
        }
    }
}

/// Text with exactly two action buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConfirmTemplate {
    /// Max 240 characters.
    pub text: String,
    pub actions: Vec<TemplateAction>,
}

/// Up to ten columns cycled horizontally.
///
/// All columns should have the same number of actions, and either all or
/// none of them should use an image and a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarouselTemplate {
    pub columns: Vec<CarouselColumn>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<ImageAspectRatio>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

impl CarouselTemplate {
    pub fn new(columns: Vec<CarouselColumn>) -> Self {
        Self {
            columns,
            image_aspect_ratio: None,
            image_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarouselColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_background_color: Option<String>,

    /// Max 40 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Max 120 characters, or 60 with an image or title.
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<TemplateAction>,

    /// Max 3 actions.
    pub actions: Vec<TemplateAction>,
}

impl CarouselColumn {
    pub fn new(text: impl Into<String>, actions: Vec<TemplateAction>) -> Self {
        Self {
            thumbnail_image_url: None,
            image_background_color: None,
            title: None,
            text: text.into(),
            default_action: None,
            actions,
        }
    }
}

/// Up to ten tappable images cycled horizontally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImageCarouselTemplate {
    pub columns: Vec<ImageCarouselColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageCarouselColumn {
    pub image_url: String,
    pub action: TemplateAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_tags() {
        let template = Template::ImageCarousel(ImageCarouselTemplate {
            columns: vec![ImageCarouselColumn {
                image_url: "https://example.com/bot/images/item1.jpg".into(),
                action: TemplateAction::uri("View detail", "http://example.com/page/222"),
            }],
        });
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["type"], "image_carousel");
        assert_eq!(json["columns"][0]["imageUrl"], "https://example.com/bot/images/item1.jpg");

        let buttons: Template = serde_json::from_str(
            r#"{"type":"buttons","text":"Please select","imageAspectRatio":"square","actions":[]}"#,
        )
        .unwrap();
        match buttons {
            Template::Buttons(b) => assert_eq!(b.image_aspect_ratio, Some(ImageAspectRatio::Square)),
            other => panic!("unexpected template {other:?}"),
        }
    }
}
