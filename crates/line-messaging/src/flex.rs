//! Flex messages: freely laid-out containers built from nested boxes.
//!
//! A [`FlexContainer`] is a single [`FlexBubble`] or a [`FlexCarousel`] of
//! bubbles. Bubble regions are [`FlexBox`]es whose `contents` may hold
//! further boxes to any depth; the validator bounds that depth.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::TemplateAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexMessage {
    /// Max 400 characters.
    pub alt_text: String,

    pub contents: FlexContainer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexContainer {
    Bubble(FlexBubble),
    Carousel(FlexCarousel),
}

/// Width class of a bubble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BubbleSize {
    Nano,
    Micro,
    Kilo,
    #[default]
    Mega,
    Giga,
}

impl BubbleSize {
    pub fn as_str(self) -> &'static str {
        match self {
            BubbleSize::Nano => "nano",
            BubbleSize::Micro => "micro",
            BubbleSize::Kilo => "kilo",
            BubbleSize::Mega => "mega",
            BubbleSize::Giga => "giga",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexBubble {
    /// Unset means `mega`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<BubbleSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<FlexDirection>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "boxed_region")]
    #[schemars(with = "Option<FlexBox>")]
    pub header: Option<FlexBox>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<FlexHero>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "boxed_region")]
    #[schemars(with = "Option<FlexBox>")]
    pub body: Option<FlexBox>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "boxed_region")]
    #[schemars(with = "Option<FlexBox>")]
    pub footer: Option<FlexBox>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<FlexBubbleStyles>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TemplateAction>,
}

impl FlexBubble {
    /// A bubble with only a body.
    pub fn with_body(body: FlexBox) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    /// The declared size, or the API default.
    pub fn effective_size(&self) -> BubbleSize {
        self.size.unwrap_or_default()
    }
}

/// The hero region: an image or a box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexHero {
    Box(FlexBox),
    Image(FlexImage),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexBubbleStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<FlexBlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<FlexBlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FlexBlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FlexBlockStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexBlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator_color: Option<String>,
}

/// Up to ten bubbles of one size, scrolled horizontally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexCarousel {
    #[serde(with = "tagged_bubbles")]
    #[schemars(with = "Vec<FlexBubble>")]
    pub contents: Vec<FlexBubble>,
}

// ── Box ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlexLayout {
    Horizontal,
    #[default]
    Vertical,
    /// Children are aligned on the text baseline; only icons, text,
    /// fillers and spacers may be placed here.
    Baseline,
}

impl FlexLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            FlexLayout::Horizontal => "horizontal",
            FlexLayout::Vertical => "vertical",
            FlexLayout::Baseline => "baseline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlexPosition {
    Relative,
    Absolute,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexBox {
    pub layout: FlexLayout,

    pub contents: Vec<FlexComponent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_all: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<FlexPosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_top: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TemplateAction>,
}

impl FlexBox {
    pub fn new(layout: FlexLayout, contents: Vec<FlexComponent>) -> Self {
        Self {
            layout,
            contents,
            ..Self::default()
        }
    }

    pub fn vertical(contents: Vec<FlexComponent>) -> Self {
        Self::new(FlexLayout::Vertical, contents)
    }

    pub fn horizontal(contents: Vec<FlexComponent>) -> Self {
        Self::new(FlexLayout::Horizontal, contents)
    }
}

/// A child of a box, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexComponent {
    Box(FlexBox),
    Button(FlexButton),
    Icon(FlexIcon),
    Image(FlexImage),
    Text(FlexText),
    Separator(FlexSeparator),
    Filler(FlexFiller),
    Spacer(FlexSpacer),
}

impl FlexComponent {
    pub fn kind(&self) -> &'static str {
        match self {
            FlexComponent::Box(_) => "box",
            FlexComponent::Button(_) => "button",
            FlexComponent::Icon(_) => "icon",
            FlexComponent::Image(_) => "image",
            FlexComponent::Text(_) => "text",
            FlexComponent::Separator(_) => "separator",
            FlexComponent::Filler(_) => "filler",
            FlexComponent::Spacer(_) => "spacer",
        }
    }

    /// Convenience: a text component.
    pub fn text(text: impl Into<String>) -> Self {
        FlexComponent::Text(FlexText::new(text))
    }
}

impl From<FlexBox> for FlexComponent {
    fn from(b: FlexBox) -> Self {
        FlexComponent::Box(b)
    }
}

// ── Leaf components ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlexAlign {
    Start,
    End,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlexGravity {
    Top,
    Bottom,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Link,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ButtonHeight {
    Sm,
    Md,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    Cover,
    Fit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexButton {
    /// Required, with a label.
    pub action: TemplateAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<ButtonHeight>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ButtonStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<FlexGravity>,
}

impl FlexButton {
    pub fn new(action: TemplateAction) -> Self {
        Self {
            action,
            flex: None,
            margin: None,
            height: None,
            style: None,
            color: None,
            gravity: None,
        }
    }
}

/// Decorative icon; only valid inside baseline boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexIcon {
    /// HTTPS PNG, max 2000 characters.
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexImage {
    /// HTTPS JPEG/PNG, max 2000 characters.
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<FlexAlign>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<FlexGravity>,

    /// A size keyword (`xxs`…`5xl`, `full`) or pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_mode: Option<AspectMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TemplateAction>,
}

impl FlexImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            flex: None,
            margin: None,
            align: None,
            gravity: None,
            size: None,
            aspect_ratio: None,
            aspect_mode: None,
            background_color: None,
            action: None,
        }
    }
}

/// A run of text. When `contents` holds spans, `text` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<FlexSpan>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<FlexAlign>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<FlexGravity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<FontStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<TextDecoration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TemplateAction>,
}

impl FlexText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text rendered from spans.
    pub fn spans(contents: Vec<FlexSpan>) -> Self {
        Self {
            contents: Some(contents),
            ..Self::default()
        }
    }

    /// `true` when `contents` holds at least one span.
    pub fn has_spans(&self) -> bool {
        self.contents.as_ref().is_some_and(|spans| !spans.is_empty())
    }
}

/// Discriminant of a span; the API only defines `span`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SpanType {
    #[default]
    Span,
}

/// A styled fragment inside a [`FlexText`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlexSpan {
    #[serde(rename = "type", default)]
    pub kind: SpanType,

    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<FontStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<TextDecoration>,
}

impl FlexSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: SpanType::Span,
            text: text.into(),
            color: None,
            size: None,
            weight: None,
            style: None,
            decoration: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexSeparator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexFiller {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexSpacer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

// ── Wire helpers ─────────────────────────────────────────────
//
// Bubble regions and carousel entries carry a `type` on the wire even though
// their position already fixes the variant.

mod boxed_region {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::FlexBox;

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Tagged<'a> {
        Box(&'a FlexBox),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Owned {
        Box(FlexBox),
    }

    pub fn serialize<S: Serializer>(value: &Option<FlexBox>, serializer: S) -> Result<S::Ok, S::Error> {
        value.as_ref().map(Tagged::Box).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FlexBox>, D::Error> {
        Ok(Option::<Owned>::deserialize(deserializer)?.map(|Owned::Box(b)| b))
    }
}

mod tagged_bubbles {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::FlexBubble;

    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Tagged<'a> {
        Bubble(&'a FlexBubble),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    enum Owned {
        Bubble(FlexBubble),
    }

    pub fn serialize<S: Serializer>(value: &[FlexBubble], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for bubble in value {
            seq.serialize_element(&Tagged::Bubble(bubble))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FlexBubble>, D::Error> {
        let owned = Vec::<Owned>::deserialize(deserializer)?;
        Ok(owned.into_iter().map(|Owned::Bubble(b)| b).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_bubble_regions_carry_type() {
        let bubble = FlexBubble::with_body(FlexBox::vertical(vec![FlexComponent::text("hello")]));
        let json = serde_json::to_value(FlexContainer::Bubble(bubble.clone())).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "bubble",
                "body": {
                    "type": "box",
                    "layout": "vertical",
                    "contents": [{"type": "text", "text": "hello"}]
                }
            })
        );
        let parsed: FlexContainer = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, FlexContainer::Bubble(bubble));
    }

    #[test]
    fn test_carousel_bubbles_carry_type() {
        let raw = json!({
            "type": "carousel",
            "contents": [
                {"type": "bubble", "size": "kilo"},
                {"type": "bubble"}
            ]
        });
        let parsed: FlexContainer = serde_json::from_value(raw.clone()).unwrap();
        let FlexContainer::Carousel(carousel) = &parsed else {
            panic!("expected a carousel");
        };
        assert_eq!(carousel.contents[0].effective_size(), BubbleSize::Kilo);
        assert_eq!(carousel.contents[1].effective_size(), BubbleSize::Mega);
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_hero_accepts_image_or_box() {
        let hero: FlexHero =
            serde_json::from_str(r#"{"type":"image","url":"https://example.com/hero.png","size":"full"}"#)
                .unwrap();
        assert!(matches!(hero, FlexHero::Image(_)));
        let hero: FlexHero =
            serde_json::from_str(r#"{"type":"box","layout":"vertical","contents":[]}"#).unwrap();
        assert!(matches!(hero, FlexHero::Box(_)));
    }

    #[test]
    fn test_text_decoration_is_kebab_case() {
        let mut text = FlexText::new("sale");
        text.decoration = Some(TextDecoration::LineThrough);
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["decoration"], "line-through");
    }
}
