//! Message objects: the payloads sent by reply, push, multicast, broadcast
//! and narrowcast.
//!
//! A [`Message`] is one [`MessageNode`] variant plus the properties common
//! to every message (currently the quick reply bar).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::TemplateAction;
use crate::flex::{FlexContainer, FlexMessage};
use crate::imagemap::ImagemapMessage;
use crate::template::{Template, TemplateMessage};

/// A message ready to be sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(flatten)]
    pub node: MessageNode,

    /// Quick reply buttons shown under the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_reply: Option<QuickReply>,
}

impl Message {
    /// Convenience: a plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        MessageNode::Text(TextMessage { text: text.into() }).into()
    }

    /// Convenience: an image message.
    pub fn image(original_content_url: impl Into<String>, preview_image_url: impl Into<String>) -> Self {
        MessageNode::Image(ImageMessage {
            original_content_url: original_content_url.into(),
            preview_image_url: preview_image_url.into(),
        })
        .into()
    }

    /// Convenience: a sticker message.
    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        MessageNode::Sticker(StickerMessage {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
        })
        .into()
    }

    /// Convenience: a template message.
    pub fn template(alt_text: impl Into<String>, template: Template) -> Self {
        MessageNode::Template(TemplateMessage {
            alt_text: alt_text.into(),
            template,
        })
        .into()
    }

    /// Convenience: a flex message.
    pub fn flex(alt_text: impl Into<String>, contents: FlexContainer) -> Self {
        MessageNode::Flex(FlexMessage {
            alt_text: alt_text.into(),
            contents,
        })
        .into()
    }

    /// Attach quick reply buttons.
    pub fn with_quick_reply(mut self, quick_reply: QuickReply) -> Self {
        self.quick_reply = Some(quick_reply);
        self
    }
}

impl From<MessageNode> for Message {
    fn from(node: MessageNode) -> Self {
        Self {
            node,
            quick_reply: None,
        }
    }
}

/// A message variant, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageNode {
    Text(TextMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    Location(LocationMessage),
    Sticker(StickerMessage),
    Imagemap(ImagemapMessage),
    Template(TemplateMessage),
    Flex(FlexMessage),
}

impl MessageNode {
    /// Wire discriminant of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageNode::Text(_) => "text",
            MessageNode::Image(_) => "image",
            MessageNode::Video(_) => "video",
            MessageNode::Audio(_) => "audio",
            MessageNode::Location(_) => "location",
            MessageNode::Sticker(_) => "sticker",
            MessageNode::Imagemap(_) => "imagemap",
            MessageNode::Template(_) => "template",
            MessageNode::Flex(_) => "flex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextMessage {
    /// Max 2000 characters.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    /// HTTPS JPEG/PNG, max 1000 characters.
    pub original_content_url: String,
    pub preview_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    /// HTTPS mp4, max 1000 characters.
    pub original_content_url: String,
    pub preview_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    /// HTTPS m4a, max 1000 characters.
    pub original_content_url: String,
    /// Length of the audio in milliseconds.
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationMessage {
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    pub package_id: String,
    pub sticker_id: String,
}

// ── Quick reply ──────────────────────────────────────────────

/// Up to 13 buttons displayed at the bottom of the chat screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

/// Discriminant of a quick reply item; the API only defines `action`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuickReplyItemType {
    #[default]
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickReplyItem {
    #[serde(rename = "type", default)]
    pub kind: QuickReplyItemType,

    /// HTTPS PNG icon shown at the start of the button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Any action except `uri`.
    pub action: TemplateAction,
}

impl QuickReplyItem {
    pub fn new(action: TemplateAction) -> Self {
        Self {
            kind: QuickReplyItemType::Action,
            image_url: None,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CameraAction;

    #[test]
    fn test_message_flattens_node_and_quick_reply() {
        let msg = Message::text("Hello").with_quick_reply(QuickReply {
            items: vec![QuickReplyItem::new(TemplateAction::Camera(CameraAction {
                label: "Camera".into(),
            }))],
        });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "Hello");
        assert_eq!(json["quickReply"]["items"][0]["type"], "action");
        assert_eq!(json["quickReply"]["items"][0]["action"]["type"], "camera");

        let parsed: Message = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_location_message_parses() {
        let raw = r#"{"type":"location","title":"my location","address":"1-6-1 Yotsuya, Shinjuku-ku, Tokyo","latitude":35.687574,"longitude":139.72922}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.node.kind(), "location");
        assert!(msg.quick_reply.is_none());
    }
}
