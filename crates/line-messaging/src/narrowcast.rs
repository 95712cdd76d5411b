//! Narrowcast: messages sent to a filtered subset of friends.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filter::{DemographicFilterObject, RecipientObject};
use crate::message::Message;

/// Body of `POST /v2/bot/message/narrowcast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NarrowcastRequest {
    /// 1 to 5 messages.
    pub messages: Vec<Message>,

    /// Omitted: every friend of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<NarrowcastFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<NarrowcastLimit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_disabled: Option<bool>,
}

impl NarrowcastRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            recipient: None,
            filter: None,
            limit: None,
            notification_disabled: None,
        }
    }

    pub fn recipient(mut self, recipient: RecipientObject) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn demographic(mut self, demographic: DemographicFilterObject) -> Self {
        self.filter = Some(NarrowcastFilter { demographic });
        self
    }

    /// Send to at most `max` randomly chosen recipients.
    pub fn max(mut self, max: u64) -> Self {
        self.limit = Some(NarrowcastLimit { max: Some(max) });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NarrowcastFilter {
    pub demographic: DemographicFilterObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NarrowcastLimit {
    /// At least 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NarrowcastPhase {
    /// Still filtering or preparing.
    Waiting,
    Sending,
    Succeeded,
    /// See `failed_description`.
    Failed,
}

/// Returned by `GET /v2/bot/message/progress/narrowcast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NarrowcastProgressResponse {
    pub phase: NarrowcastPhase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_description: Option<String>,

    /// Passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<String>,
}
