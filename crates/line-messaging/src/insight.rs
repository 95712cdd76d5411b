//! Insight: delivery counts, follower statistics and message quota.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether the figures for the requested date are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightStatus {
    Ready,
    /// Still being calculated; usually ready about a day later.
    Unready,
    /// The date is earlier than the start of aggregation.
    OutOfService,
}

/// Returned by `GET /v2/bot/insight/message/delivery`. Counts are present
/// only when `status` is `ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberOfMessageDeliveries {
    pub status: InsightStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_response: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_response: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_broadcast: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_push: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_multicast: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_reply: Option<u64>,
}

/// Returned by `GET /v2/bot/insight/followers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberOfFollowers {
    pub status: InsightStatus,
    /// Times the account was added as a friend; does not decrease on block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeted_reaches: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<u64>,
}

/// Returned by `GET /v2/bot/insight/demographic`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendDemographics {
    pub available: bool,
    #[serde(default)]
    pub genders: Vec<GenderShare>,
    #[serde(default)]
    pub ages: Vec<AgeShare>,
    #[serde(default)]
    pub areas: Vec<AreaShare>,
    #[serde(default)]
    pub app_types: Vec<AppTypeShare>,
    #[serde(default)]
    pub subscription_periods: Vec<SubscriptionPeriodShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenderShare {
    /// `unknown`, `male` or `female`.
    pub gender: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AgeShare {
    pub age: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AreaShare {
    pub area: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppTypeShare {
    /// `ios`, `android` or `others`.
    pub app_type: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPeriodShare {
    /// e.g. `within7days`, `over365days`.
    pub subscription_period: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetLimitType {
    None,
    Limited,
}

/// Returned by `GET /v2/bot/message/quota`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetLimitForAdditionalMessages {
    #[serde(rename = "type")]
    pub kind: TargetLimitType,

    /// Present only when `kind` is `limited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

/// Returned by `GET /v2/bot/message/quota/consumption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberOfMessagesSentThisMonth {
    pub total_usage: u64,
}
