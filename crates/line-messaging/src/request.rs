//! Request bodies for the message sending endpoints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,

    /// 1 to 5 messages.
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_disabled: Option<bool>,
}

/// Body of `POST /v2/bot/message/push`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    /// User, group or room ID.
    pub to: String,

    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_disabled: Option<bool>,
}

/// Body of `POST /v2/bot/message/multicast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MulticastRequest {
    /// 1 to 500 user IDs.
    pub to: Vec<String>,

    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_disabled: Option<bool>,
}

/// Body of `POST /v2/bot/message/broadcast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_disabled: Option<bool>,
}

/// Options shared by push, multicast, broadcast and narrowcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Deliver without a notification sound.
    pub notification_disabled: bool,

    /// Sent as `X-Line-Retry-Key`; the API accepts a retried request with the
    /// same key only once.
    pub retry_key: Option<Uuid>,
}

impl SendOptions {
    /// Options carrying a fresh retry key.
    pub fn with_retry_key() -> Self {
        Self {
            retry_key: Some(Uuid::new_v4()),
            ..Self::default()
        }
    }

    pub(crate) fn flag(self) -> Option<bool> {
        self.notification_disabled.then_some(true)
    }
}
