//! User profiles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Returned by `GET /v2/bot/profile/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub display_name: String,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// BCP 47 tag; absent when the user has not consented to share it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
