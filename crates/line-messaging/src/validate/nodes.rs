//! Tagged node validators: one already-dispatched variant at a time.

use crate::action::{DatetimePickerAction, DatetimePickerMode, PostbackAction, TemplateAction};
use crate::flex::{FlexButton, FlexFiller, FlexIcon, FlexImage, FlexSeparator, FlexSpacer, FlexSpan, FlexText};
use crate::imagemap::{ImagemapAction, ImagemapArea};
use crate::message::{AudioMessage, ImageMessage, LocationMessage, StickerMessage, TextMessage, VideoMessage};

use super::primitive::{self, DatetimeShape, ACTION_SCHEMES, ASSET_SCHEMES};
use super::{Constraint, ErrorCode, Normalize, Validate, Validator};

pub(crate) const URL_MAX: usize = 1000;
pub(crate) const FLEX_URL_MAX: usize = 2000;
pub(crate) const ALT_TEXT_MAX: usize = 400;

const SPACING_KEYWORDS: &[&str] = &["none", "xs", "sm", "md", "lg", "xl", "xxl"];
const TEXT_SIZES: &[&str] = &["xxs", "xs", "sm", "md", "lg", "xl", "xxl", "3xl", "4xl", "5xl"];
const IMAGE_SIZES: &[&str] = &["xxs", "xs", "sm", "md", "lg", "xl", "xxl", "3xl", "4xl", "5xl", "full"];
const SPACER_SIZES: &[&str] = &["xs", "sm", "md", "lg", "xl", "xxl"];

const TEMPLATE_KINDS: &[&str] = &["postback", "message", "uri", "datetimepicker"];
const QUICK_REPLY_KINDS: &[&str] = &[
    "postback",
    "message",
    "datetimepicker",
    "camera",
    "cameraRoll",
    "location",
];
const ALL_KINDS: &[&str] = &[
    "postback",
    "message",
    "uri",
    "datetimepicker",
    "camera",
    "cameraRoll",
    "location",
];

/// Where an action is placed. Decides the label rules and allowed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionContext {
    /// Validated on its own; every kind is accepted and labels are optional.
    Standalone,
    /// Buttons, confirm and carousel template actions.
    Template,
    /// Image carousel column action (label max 12).
    ImageCarousel,
    QuickReply,
    FlexButton,
    /// Actions on flex boxes, images, texts and bubbles.
    FlexComponent,
    RichMenu,
}

impl ActionContext {
    pub fn label_required(self) -> bool {
        matches!(
            self,
            ActionContext::Template
                | ActionContext::ImageCarousel
                | ActionContext::QuickReply
                | ActionContext::FlexButton
        )
    }

    pub fn label_max(self) -> usize {
        match self {
            ActionContext::ImageCarousel => 12,
            _ => 20,
        }
    }

    pub fn allowed_kinds(self) -> &'static [&'static str] {
        match self {
            ActionContext::Standalone => ALL_KINDS,
            ActionContext::QuickReply => QUICK_REPLY_KINDS,
            _ => TEMPLATE_KINDS,
        }
    }
}

// ── Actions ──────────────────────────────────────────────────

/// Validate `action` as placed in `ctx`.
pub(crate) fn action(action: &TemplateAction, ctx: ActionContext, v: &mut Validator) {
    v.check("type", primitive::one_of(action.kind(), "action type", ctx.allowed_kinds()));

    match action.label() {
        Some(label) => v.max_len("label", label, ctx.label_max()),
        None if ctx.label_required() => v.required("label", "a label is required in this context"),
        None => {}
    }

    match action {
        TemplateAction::Postback(a) => postback(a, v),
        TemplateAction::Message(a) => v.max_len("text", &a.text, 300),
        TemplateAction::Uri(a) => v.url("uri", &a.uri, ACTION_SCHEMES, URL_MAX),
        TemplateAction::DatetimePicker(a) => datetime_picker(a, v),
        TemplateAction::Camera(_) | TemplateAction::CameraRoll(_) | TemplateAction::Location(_) => {}
    }
}

pub(crate) fn opt_action(
    name: &'static str,
    value: Option<&TemplateAction>,
    ctx: ActionContext,
    v: &mut Validator,
) {
    if let Some(a) = value {
        v.field(name, |v| action(a, ctx, v));
    }
}

fn postback(a: &PostbackAction, v: &mut Validator) {
    v.max_len("data", &a.data, 300);
    v.opt_max_len("text", a.text.as_deref(), 300);
    v.opt_max_len("displayText", a.display_text.as_deref(), 300);
    if a.text.is_some() && a.display_text.is_some() {
        v.exclusive("text", "displayText");
    }
}

fn datetime_picker(a: &DatetimePickerAction, v: &mut Validator) {
    v.max_len("data", &a.data, 300);
    let shape = match a.mode {
        DatetimePickerMode::Date => DatetimeShape::Date,
        DatetimePickerMode::Time => DatetimeShape::Time,
        DatetimePickerMode::Datetime => DatetimeShape::Datetime,
    };

    if let Some(initial) = &a.initial {
        v.check("initial", primitive::datetime(initial, shape));
    }
    let min = a.min.as_deref().map(|m| primitive::parse_datetime(m, shape));
    let max = a.max.as_deref().map(|m| primitive::parse_datetime(m, shape));
    match (min, max) {
        (Some(Ok(lo)), Some(Ok(hi))) if lo >= hi => {
            let actual = a.min.clone();
            v.field("min", |v| {
                v.report(
                    ErrorCode::FieldConstraintViolation,
                    Constraint::LessThan("max"),
                    actual,
                    "`min` must be earlier than `max`",
                )
            });
        }
        (min, max) => {
            if let Some(Err(violation)) = min {
                v.check("min", Err(violation));
            }
            if let Some(Err(violation)) = max {
                v.check("max", Err(violation));
            }
        }
    }
}

impl Validate for TemplateAction {
    fn validate_with(&self, v: &mut Validator) {
        action(self, ActionContext::Standalone, v);
    }
}

impl Validate for PostbackAction {
    fn validate_with(&self, v: &mut Validator) {
        v.opt_max_len("label", self.label.as_deref(), 20);
        postback(self, v);
    }
}

impl Normalize for TemplateAction {}
impl Normalize for PostbackAction {}

// ── Leaf messages ────────────────────────────────────────────

impl Validate for TextMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.max_len("text", &self.text, 2000);
    }
}

impl Validate for ImageMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.url("originalContentUrl", &self.original_content_url, ASSET_SCHEMES, URL_MAX);
        v.url("previewImageUrl", &self.preview_image_url, ASSET_SCHEMES, URL_MAX);
    }
}

impl Validate for VideoMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.url("originalContentUrl", &self.original_content_url, ASSET_SCHEMES, URL_MAX);
        v.url("previewImageUrl", &self.preview_image_url, ASSET_SCHEMES, URL_MAX);
    }
}

impl Validate for AudioMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.url("originalContentUrl", &self.original_content_url, ASSET_SCHEMES, URL_MAX);
    }
}

impl Validate for LocationMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.max_len("title", &self.title, 100);
        v.max_len("address", &self.address, 100);
        v.check("latitude", primitive::range_f64(self.latitude, -90, 90));
        v.check("longitude", primitive::range_f64(self.longitude, -180, 180));
    }
}

impl Validate for StickerMessage {
    fn validate_with(&self, _v: &mut Validator) {}
}

// ── Imagemap leaves ──────────────────────────────────────────

pub(crate) fn imagemap_area(area: &ImagemapArea, v: &mut Validator) {
    v.check("x", primitive::at_least(area.x, 0));
    v.check("y", primitive::at_least(area.y, 0));
    v.check("width", primitive::at_least(area.width, 1));
    v.check("height", primitive::at_least(area.height, 1));
}

impl Validate for ImagemapAction {
    fn validate_with(&self, v: &mut Validator) {
        match self {
            ImagemapAction::Uri(a) => {
                v.opt_max_len("label", a.label.as_deref(), 50);
                v.url("linkUri", &a.link_uri, ACTION_SCHEMES, URL_MAX);
            }
            ImagemapAction::Message(a) => {
                v.opt_max_len("label", a.label.as_deref(), 50);
                v.max_len("text", &a.text, 400);
            }
        }
        v.field("area", |v| imagemap_area(self.area(), v));
    }
}

// ── Flex leaves ──────────────────────────────────────────────

fn opt_size(v: &mut Validator, name: &'static str, value: Option<&str>, keywords: &'static [&'static str]) {
    if let Some(value) = value {
        v.check(name, primitive::flex_size(value, keywords));
    }
}

fn opt_flex(v: &mut Validator, value: Option<i64>) {
    if let Some(flex) = value {
        v.check("flex", primitive::at_least(flex, 0));
    }
}

fn opt_aspect_ratio(v: &mut Validator, value: Option<&str>) {
    if let Some(ratio) = value {
        v.check("aspectRatio", primitive::aspect_ratio(ratio));
    }
}

impl Validate for FlexButton {
    fn validate_with(&self, v: &mut Validator) {
        v.field("action", |v| action(&self.action, ActionContext::FlexButton, v));
        opt_flex(v, self.flex);
        opt_size(v, "margin", self.margin.as_deref(), SPACING_KEYWORDS);
        v.opt_color("color", self.color.as_deref(), true);
    }
}

impl Validate for FlexIcon {
    fn validate_with(&self, v: &mut Validator) {
        v.url("url", &self.url, ASSET_SCHEMES, FLEX_URL_MAX);
        opt_size(v, "margin", self.margin.as_deref(), SPACING_KEYWORDS);
        opt_size(v, "size", self.size.as_deref(), TEXT_SIZES);
        opt_aspect_ratio(v, self.aspect_ratio.as_deref());
    }
}

impl Validate for FlexImage {
    fn validate_with(&self, v: &mut Validator) {
        v.url("url", &self.url, ASSET_SCHEMES, FLEX_URL_MAX);
        opt_flex(v, self.flex);
        opt_size(v, "margin", self.margin.as_deref(), SPACING_KEYWORDS);
        opt_size(v, "size", self.size.as_deref(), IMAGE_SIZES);
        opt_aspect_ratio(v, self.aspect_ratio.as_deref());
        v.opt_color("backgroundColor", self.background_color.as_deref(), true);
        opt_action("action", self.action.as_ref(), ActionContext::FlexComponent, v);
    }
}

impl Validate for FlexText {
    fn validate_with(&self, v: &mut Validator) {
        if self.text.is_none() && !self.has_spans() {
            v.report(
                ErrorCode::FieldConstraintViolation,
                Constraint::RequiredOneOf("text", "contents"),
                None,
                "either `text` or non-empty `contents` is required",
            );
        }
        if let Some(spans) = &self.contents {
            v.each("contents", spans, |span, v| span.validate_with(v));
        }
        opt_flex(v, self.flex);
        opt_size(v, "margin", self.margin.as_deref(), SPACING_KEYWORDS);
        opt_size(v, "size", self.size.as_deref(), TEXT_SIZES);
        if let Some(lines) = self.max_lines {
            v.check("maxLines", primitive::at_least(lines, 0));
        }
        v.opt_color("color", self.color.as_deref(), true);
        opt_action("action", self.action.as_ref(), ActionContext::FlexComponent, v);
    }
}

/// Spans win over `text`: when both are given, `text` is dropped.
impl Normalize for FlexText {
    fn normalize(mut self) -> Self {
        if self.has_spans() {
            self.text = None;
        }
        self
    }
}

impl Validate for FlexSpan {
    fn validate_with(&self, v: &mut Validator) {
        v.opt_color("color", self.color.as_deref(), true);
        opt_size(v, "size", self.size.as_deref(), TEXT_SIZES);
    }
}

impl Validate for FlexSeparator {
    fn validate_with(&self, v: &mut Validator) {
        opt_size(v, "margin", self.margin.as_deref(), SPACING_KEYWORDS);
        v.opt_color("color", self.color.as_deref(), true);
    }
}

impl Validate for FlexFiller {
    fn validate_with(&self, v: &mut Validator) {
        opt_flex(v, self.flex);
    }
}

impl Validate for FlexSpacer {
    fn validate_with(&self, v: &mut Validator) {
        if let Some(size) = &self.size {
            v.check("size", primitive::one_of(size, "spacer size", SPACER_SIZES));
        }
    }
}

/// Spacing keyword or pixel value, used by boxes in the walker.
pub(crate) fn spacing(v: &mut Validator, name: &'static str, value: Option<&str>) {
    opt_size(v, name, value, SPACING_KEYWORDS);
}
