//! Recursive tree walker: containers, structural bounds, cross-child rules.

use crate::audience::{
    Audience, CreateClickAudienceGroupRequest, CreateUploadAudienceGroupRequest, GetAudienceGroupsOptions,
    UpdateUploadAudienceGroupRequest,
};
use crate::flex::{
    BubbleSize, FlexBlockStyle, FlexBox, FlexBubble, FlexBubbleStyles, FlexComponent, FlexContainer, FlexHero,
    FlexLayout, FlexMessage,
};
use crate::imagemap::{ImagemapMessage, ImagemapVideo};
use crate::liff::{NewLiffApp, PartialLiffApp};
use crate::message::{Message, MessageNode, QuickReply};
use crate::narrowcast::NarrowcastRequest;
use crate::request::{BroadcastRequest, MulticastRequest, PushRequest, ReplyRequest};
use crate::rich_menu::{RichMenu, RichMenuArea, RICH_MENU_SIZES};
use crate::template::{ButtonsTemplate, CarouselColumn, CarouselTemplate, ConfirmTemplate, Template, TemplateMessage};

use super::nodes::{self, ActionContext, ALT_TEXT_MAX, URL_MAX};
use super::primitive::{self, ACTION_SCHEMES, ASSET_SCHEMES};
use super::{limits, Constraint, ErrorCode, Normalize, Validate, Validator};

const BASELINE_CHILDREN: &[&str] = &["icon", "text", "filler", "spacer"];
const RICH_MENU_SIZE_NAMES: &[&str] = &["2500x1686", "2500x843", "1200x810", "1200x405", "800x540", "800x270"];
const CLICK_URL_SCHEMES: &[&str] = &["http", "https"];
const AUDIENCE_NAME_MAX: usize = 120;

fn non_empty(v: &mut Validator, name: &'static str, value: &str) {
    if value.is_empty() {
        v.field(name, |v| {
            v.report(
                ErrorCode::FieldConstraintViolation,
                Constraint::NonEmpty,
                None,
                "must not be empty",
            )
        });
    }
}

/// Validate a send request's message list: bounds, then every message.
fn messages(v: &mut Validator, messages: &[Message]) {
    v.bounds("messages", messages.len(), 1, limits::MESSAGES_PER_REQUEST);
    v.each("messages", messages, |m, v| m.validate_with(v));
}

fn normalize_messages(messages: Vec<Message>) -> Vec<Message> {
    messages.into_iter().map(Normalize::normalize).collect()
}

// ── Messages ─────────────────────────────────────────────────

impl Validate for Message {
    fn validate_with(&self, v: &mut Validator) {
        self.node.validate_with(v);
        if let Some(quick_reply) = &self.quick_reply {
            v.field("quickReply", |v| quick_reply.validate_with(v));
        }
    }
}

impl Normalize for Message {
    fn normalize(self) -> Self {
        Self {
            node: self.node.normalize(),
            quick_reply: self.quick_reply,
        }
    }
}

impl Validate for MessageNode {
    fn validate_with(&self, v: &mut Validator) {
        match self {
            MessageNode::Text(m) => m.validate_with(v),
            MessageNode::Image(m) => m.validate_with(v),
            MessageNode::Video(m) => m.validate_with(v),
            MessageNode::Audio(m) => m.validate_with(v),
            MessageNode::Location(m) => m.validate_with(v),
            MessageNode::Sticker(m) => m.validate_with(v),
            MessageNode::Imagemap(m) => m.validate_with(v),
            MessageNode::Template(m) => m.validate_with(v),
            MessageNode::Flex(m) => m.validate_with(v),
        }
    }
}

impl Normalize for MessageNode {
    fn normalize(self) -> Self {
        match self {
            MessageNode::Flex(m) => MessageNode::Flex(m.normalize()),
            other => other,
        }
    }
}

impl Validate for QuickReply {
    fn validate_with(&self, v: &mut Validator) {
        v.bounds("items", self.items.len(), 1, limits::QUICK_REPLY_ITEMS);
        v.each("items", &self.items, |item, v| {
            v.opt_url("imageUrl", item.image_url.as_deref(), ASSET_SCHEMES, URL_MAX);
            v.field("action", |v| nodes::action(&item.action, ActionContext::QuickReply, v));
        });
    }
}

// ── Imagemap ─────────────────────────────────────────────────

impl Validate for ImagemapMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.url("baseUrl", &self.base_url, ASSET_SCHEMES, URL_MAX);
        v.max_len("altText", &self.alt_text, ALT_TEXT_MAX);
        v.field("baseSize", |v| {
            v.check("width", primitive::range(self.base_size.width, 1040, 1040));
            v.check("height", primitive::at_least(self.base_size.height, 1));
        });
        if let Some(video) = &self.video {
            v.field("video", |v| video.validate_with(v));
        }
        v.bounds("actions", self.actions.len(), 1, limits::IMAGEMAP_ACTIONS);
        v.each("actions", &self.actions, |a, v| a.validate_with(v));
    }
}

impl Validate for ImagemapVideo {
    fn validate_with(&self, v: &mut Validator) {
        v.url("originalContentUrl", &self.original_content_url, ASSET_SCHEMES, URL_MAX);
        v.url("previewImageUrl", &self.preview_image_url, ASSET_SCHEMES, URL_MAX);
        v.field("area", |v| nodes::imagemap_area(&self.area, v));
        v.field("externalLink", |v| {
            v.url("linkUri", &self.external_link.link_uri, ACTION_SCHEMES, URL_MAX);
            v.max_len("label", &self.external_link.label, 30);
        });
    }
}

impl Normalize for ImagemapMessage {}

// ── Templates ────────────────────────────────────────────────

impl Validate for TemplateMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.max_len("altText", &self.alt_text, ALT_TEXT_MAX);
        v.field("template", |v| self.template.validate_with(v));
    }
}

impl Normalize for TemplateMessage {}

impl Validate for Template {
    fn validate_with(&self, v: &mut Validator) {
        match self {
            Template::Buttons(t) => t.validate_with(v),
            Template::Confirm(t) => t.validate_with(v),
            Template::Carousel(t) => t.validate_with(v),
            Template::ImageCarousel(t) => {
                v.bounds("columns", t.columns.len(), 1, limits::CAROUSEL_COLUMNS);
                v.each("columns", &t.columns, |column, v| {
                    v.url("imageUrl", &column.image_url, ASSET_SCHEMES, URL_MAX);
                    v.field("action", |v| {
                        nodes::action(&column.action, ActionContext::ImageCarousel, v)
                    });
                });
            }
        }
    }
}

impl Normalize for Template {}

/// Text limit drops when an image or title is shown.
fn template_text(v: &mut Validator, text: &str, decorated: bool, plain_max: usize) {
    let max = if decorated { 60 } else { plain_max };
    v.max_len("text", text, max);
}

fn template_actions(v: &mut Validator, actions: &[crate::action::TemplateAction], min: usize, max: usize) {
    v.bounds("actions", actions.len(), min, max);
    v.each("actions", actions, |a, v| nodes::action(a, ActionContext::Template, v));
}

impl Validate for ButtonsTemplate {
    fn validate_with(&self, v: &mut Validator) {
        v.opt_url("thumbnailImageUrl", self.thumbnail_image_url.as_deref(), ASSET_SCHEMES, URL_MAX);
        v.opt_color("imageBackgroundColor", self.image_background_color.as_deref(), false);
        v.opt_max_len("title", self.title.as_deref(), 40);
        let decorated = self.thumbnail_image_url.is_some() || self.title.is_some();
        template_text(v, &self.text, decorated, 160);
        nodes::opt_action("defaultAction", self.default_action.as_ref(), ActionContext::Template, v);
        template_actions(v, &self.actions, 1, limits::BUTTONS_ACTIONS);
    }
}

impl Validate for ConfirmTemplate {
    fn validate_with(&self, v: &mut Validator) {
        v.max_len("text", &self.text, 240);
        template_actions(v, &self.actions, limits::CONFIRM_ACTIONS, limits::CONFIRM_ACTIONS);
    }
}

impl Validate for CarouselColumn {
    fn validate_with(&self, v: &mut Validator) {
        v.opt_url("thumbnailImageUrl", self.thumbnail_image_url.as_deref(), ASSET_SCHEMES, URL_MAX);
        v.opt_color("imageBackgroundColor", self.image_background_color.as_deref(), false);
        v.opt_max_len("title", self.title.as_deref(), 40);
        let decorated = self.thumbnail_image_url.is_some() || self.title.is_some();
        template_text(v, &self.text, decorated, 120);
        nodes::opt_action("defaultAction", self.default_action.as_ref(), ActionContext::Template, v);
        template_actions(v, &self.actions, 1, limits::CAROUSEL_COLUMN_ACTIONS);
    }
}

impl Validate for CarouselTemplate {
    fn validate_with(&self, v: &mut Validator) {
        v.bounds("columns", self.columns.len(), 1, limits::CAROUSEL_COLUMNS);
        v.each("columns", &self.columns, |column, v| column.validate_with(v));

        let Some(first) = self.columns.first() else {
            return;
        };
        let rest = &self.columns[1..];
        if rest.iter().any(|c| c.actions.len() != first.actions.len()) {
            v.cross_child("columns", "actions", "every column must have the same number of actions");
        }
        if rest.iter().any(|c| c.thumbnail_image_url.is_some() != first.thumbnail_image_url.is_some()) {
            v.cross_child(
                "columns",
                "thumbnailImageUrl",
                "either every column or no column must have an image",
            );
        }
        if rest.iter().any(|c| c.title.is_some() != first.title.is_some()) {
            v.cross_child("columns", "title", "either every column or no column must have a title");
        }
    }
}

// ── Flex ─────────────────────────────────────────────────────

impl Validate for FlexMessage {
    fn validate_with(&self, v: &mut Validator) {
        v.max_len("altText", &self.alt_text, ALT_TEXT_MAX);
        v.field("contents", |v| self.contents.validate_with(v));
    }
}

impl Normalize for FlexMessage {
    fn normalize(self) -> Self {
        Self {
            alt_text: self.alt_text,
            contents: self.contents.normalize(),
        }
    }
}

impl Validate for FlexContainer {
    fn validate_with(&self, v: &mut Validator) {
        match self {
            FlexContainer::Bubble(bubble) => bubble.validate_with(v),
            FlexContainer::Carousel(carousel) => {
                let bubbles = &carousel.contents;
                v.bounds("contents", bubbles.len(), 1, limits::FLEX_CAROUSEL_BUBBLES);
                v.each("contents", bubbles, |bubble, v| bubble.validate_with(v));

                let sizes: Vec<BubbleSize> = bubbles.iter().map(FlexBubble::effective_size).collect();
                if let Some(first) = sizes.first() {
                    if let Some(other) = sizes.iter().find(|s| *s != first) {
                        v.cross_child(
                            "contents",
                            "size",
                            format!(
                                "every bubble in a carousel must have the same size, found `{}` and `{}`",
                                first.as_str(),
                                other.as_str()
                            ),
                        );
                    }
                }
            }
        }
    }
}

impl Normalize for FlexContainer {
    fn normalize(self) -> Self {
        match self {
            FlexContainer::Bubble(bubble) => FlexContainer::Bubble(bubble.normalize()),
            FlexContainer::Carousel(mut carousel) => {
                carousel.contents = carousel.contents.into_iter().map(Normalize::normalize).collect();
                FlexContainer::Carousel(carousel)
            }
        }
    }
}

fn block_style(v: &mut Validator, name: &'static str, style: Option<&FlexBlockStyle>) {
    if let Some(style) = style {
        v.field(name, |v| {
            v.opt_color("backgroundColor", style.background_color.as_deref(), true);
            v.opt_color("separatorColor", style.separator_color.as_deref(), true);
        });
    }
}

fn bubble_styles(v: &mut Validator, styles: &FlexBubbleStyles) {
    block_style(v, "header", styles.header.as_ref());
    block_style(v, "hero", styles.hero.as_ref());
    block_style(v, "body", styles.body.as_ref());
    block_style(v, "footer", styles.footer.as_ref());
}

impl Validate for FlexBubble {
    fn validate_with(&self, v: &mut Validator) {
        if let Some(header) = &self.header {
            v.field("header", |v| header.validate_with(v));
        }
        match &self.hero {
            Some(FlexHero::Box(hero)) => v.field("hero", |v| hero.validate_with(v)),
            Some(FlexHero::Image(hero)) => v.field("hero", |v| hero.validate_with(v)),
            None => {}
        }
        if let Some(body) = &self.body {
            v.field("body", |v| body.validate_with(v));
        }
        if let Some(footer) = &self.footer {
            v.field("footer", |v| footer.validate_with(v));
        }
        if let Some(styles) = &self.styles {
            v.field("styles", |v| bubble_styles(v, styles));
        }
        nodes::opt_action("action", self.action.as_ref(), ActionContext::FlexComponent, v);
    }
}

impl Normalize for FlexBubble {
    fn normalize(self) -> Self {
        Self {
            header: self.header.map(Normalize::normalize),
            hero: self.hero.map(|hero| match hero {
                FlexHero::Box(b) => FlexHero::Box(b.normalize()),
                image => image,
            }),
            body: self.body.map(Normalize::normalize),
            footer: self.footer.map(Normalize::normalize),
            ..self
        }
    }
}

impl Validate for FlexBox {
    fn validate_with(&self, v: &mut Validator) {
        v.nested(|v| {
            nodes::spacing(v, "spacing", self.spacing.as_deref());
            nodes::spacing(v, "margin", self.margin.as_deref());
            if let Some(flex) = self.flex {
                v.check("flex", primitive::at_least(flex, 0));
            }
            v.opt_color("backgroundColor", self.background_color.as_deref(), true);
            v.opt_color("borderColor", self.border_color.as_deref(), true);
            nodes::opt_action("action", self.action.as_ref(), ActionContext::FlexComponent, v);

            let baseline = self.layout == FlexLayout::Baseline;
            v.each("contents", &self.contents, |child, v| {
                if baseline {
                    v.check(
                        "type",
                        primitive::one_of(child.kind(), "baseline box child", BASELINE_CHILDREN),
                    );
                }
                child.validate_with(v);
            });
        });
    }
}

impl Normalize for FlexBox {
    fn normalize(mut self) -> Self {
        self.contents = self.contents.into_iter().map(Normalize::normalize).collect();
        self
    }
}

impl Validate for FlexComponent {
    fn validate_with(&self, v: &mut Validator) {
        match self {
            FlexComponent::Box(c) => c.validate_with(v),
            FlexComponent::Button(c) => c.validate_with(v),
            FlexComponent::Icon(c) => c.validate_with(v),
            FlexComponent::Image(c) => c.validate_with(v),
            FlexComponent::Text(c) => c.validate_with(v),
            FlexComponent::Separator(c) => c.validate_with(v),
            FlexComponent::Filler(c) => c.validate_with(v),
            FlexComponent::Spacer(c) => c.validate_with(v),
        }
    }
}

impl Normalize for FlexComponent {
    fn normalize(self) -> Self {
        match self {
            FlexComponent::Box(c) => FlexComponent::Box(c.normalize()),
            FlexComponent::Text(c) => FlexComponent::Text(c.normalize()),
            other => other,
        }
    }
}

// ── Send requests ────────────────────────────────────────────

impl Validate for ReplyRequest {
    fn validate_with(&self, v: &mut Validator) {
        non_empty(v, "replyToken", &self.reply_token);
        messages(v, &self.messages);
    }
}

impl Normalize for ReplyRequest {
    fn normalize(mut self) -> Self {
        self.messages = normalize_messages(self.messages);
        self
    }
}

impl Validate for PushRequest {
    fn validate_with(&self, v: &mut Validator) {
        non_empty(v, "to", &self.to);
        messages(v, &self.messages);
    }
}

impl Normalize for PushRequest {
    fn normalize(mut self) -> Self {
        self.messages = normalize_messages(self.messages);
        self
    }
}

impl Validate for MulticastRequest {
    fn validate_with(&self, v: &mut Validator) {
        v.bounds("to", self.to.len(), 1, limits::MULTICAST_RECIPIENTS);
        messages(v, &self.messages);
    }
}

impl Normalize for MulticastRequest {
    fn normalize(mut self) -> Self {
        self.messages = normalize_messages(self.messages);
        self
    }
}

impl Validate for BroadcastRequest {
    fn validate_with(&self, v: &mut Validator) {
        messages(v, &self.messages);
    }
}

impl Normalize for BroadcastRequest {
    fn normalize(mut self) -> Self {
        self.messages = normalize_messages(self.messages);
        self
    }
}

impl Validate for NarrowcastRequest {
    fn validate_with(&self, v: &mut Validator) {
        messages(v, &self.messages);
        if let Some(recipient) = &self.recipient {
            v.field("recipient", |v| recipient.validate_with(v));
        }
        if let Some(filter) = &self.filter {
            v.field("filter", |v| v.field("demographic", |v| filter.demographic.validate_with(v)));
        }
        if let Some(max) = self.limit.as_ref().and_then(|l| l.max) {
            v.field("limit", |v| {
                v.check("max", primitive::at_least(i64::try_from(max).unwrap_or(i64::MAX), 1))
            });
        }
    }
}

impl Normalize for NarrowcastRequest {
    fn normalize(mut self) -> Self {
        self.messages = normalize_messages(self.messages);
        self
    }
}

// ── Rich menus ───────────────────────────────────────────────

impl Validate for RichMenu {
    fn validate_with(&self, v: &mut Validator) {
        if !RICH_MENU_SIZES.contains(&(self.size.width, self.size.height)) {
            let actual = format!("{}x{}", self.size.width, self.size.height);
            v.check("size", primitive::one_of(&actual, "rich menu size", RICH_MENU_SIZE_NAMES));
        }
        v.max_len("name", &self.name, 300);
        v.max_len("chatBarText", &self.chat_bar_text, 14);
        v.bounds("areas", self.areas.len(), 0, limits::RICH_MENU_AREAS);
        v.each("areas", &self.areas, |area, v| area.validate_with(v));
    }
}

impl Validate for RichMenuArea {
    fn validate_with(&self, v: &mut Validator) {
        v.field("bounds", |v| {
            v.check("x", primitive::at_least(self.bounds.x, 0));
            v.check("y", primitive::at_least(self.bounds.y, 0));
            v.check("width", primitive::at_least(self.bounds.width, 1));
            v.check("height", primitive::at_least(self.bounds.height, 1));
        });
        v.field("action", |v| nodes::action(&self.action, ActionContext::RichMenu, v));
    }
}

impl Normalize for RichMenu {}

// ── Audience ─────────────────────────────────────────────────

impl Validate for CreateClickAudienceGroupRequest {
    fn validate_with(&self, v: &mut Validator) {
        non_empty(v, "description", &self.description);
        v.max_len("description", &self.description, AUDIENCE_NAME_MAX);
        non_empty(v, "requestId", &self.request_id);
        v.opt_url("clickUrl", self.click_url.as_deref(), CLICK_URL_SCHEMES, 2000);
    }
}

impl Normalize for CreateClickAudienceGroupRequest {}

fn upload_audiences(v: &mut Validator, audiences: &[Audience]) {
    v.bounds("audiences", audiences.len(), 1, limits::UPLOAD_AUDIENCES);
    v.each("audiences", audiences, |audience, v| non_empty(v, "id", &audience.id));
}

impl Validate for CreateUploadAudienceGroupRequest {
    fn validate_with(&self, v: &mut Validator) {
        non_empty(v, "description", &self.description);
        v.max_len("description", &self.description, AUDIENCE_NAME_MAX);
        upload_audiences(v, &self.audiences);
    }
}

impl Normalize for CreateUploadAudienceGroupRequest {}

impl Validate for UpdateUploadAudienceGroupRequest {
    fn validate_with(&self, v: &mut Validator) {
        v.check("audienceGroupId", primitive::at_least(self.audience_group_id, 1));
        if let Some(description) = &self.description {
            non_empty(v, "description", description);
            v.max_len("description", description, AUDIENCE_NAME_MAX);
        }
        upload_audiences(v, &self.audiences);
    }
}

impl Normalize for UpdateUploadAudienceGroupRequest {}

impl Validate for GetAudienceGroupsOptions {
    fn validate_with(&self, v: &mut Validator) {
        if let Some(page) = self.page {
            v.check("page", primitive::at_least(page, 1));
        }
        if let Some(size) = self.size {
            v.check("size", primitive::range(size, 1, 40));
        }
    }
}

impl Normalize for GetAudienceGroupsOptions {}

// ── LIFF ─────────────────────────────────────────────────────

impl Validate for NewLiffApp {
    fn validate_with(&self, v: &mut Validator) {
        v.field("view", |v| v.url("url", &self.view.url, ASSET_SCHEMES, URL_MAX));
    }
}

impl Normalize for NewLiffApp {}

impl Validate for PartialLiffApp {
    fn validate_with(&self, v: &mut Validator) {
        if let Some(view) = &self.view {
            v.field("view", |v| v.opt_url("url", view.url.as_deref(), ASSET_SCHEMES, URL_MAX));
        }
    }
}

impl Normalize for PartialLiffApp {}
