//! LIFF apps: web apps opened inside LINE from a `https://liff.line.me/{liffId}` link.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Height of the LIFF view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LiffViewType {
    /// 50% of the screen height.
    Compact,
    /// 80% of the screen height.
    Tall,
    /// The whole screen.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LiffView {
    #[serde(rename = "type")]
    pub kind: LiffViewType,

    /// Endpoint URL of the app (HTTPS).
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LiffFeatures {
    /// Bluetooth Low Energy support for LINE Things.
    pub ble: bool,
}

/// A registered LIFF app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiffApp {
    pub liff_id: String,

    pub view: LiffView,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<LiffFeatures>,
}

/// Body of `POST /liff/v1/apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewLiffApp {
    pub view: LiffView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<LiffFeatures>,
}

impl NewLiffApp {
    pub fn new(kind: LiffViewType, url: impl Into<String>) -> Self {
        Self {
            view: LiffView { kind, url: url.into() },
            description: None,
            features: None,
        }
    }
}

/// Body of `PUT /liff/v1/apps/{liffId}`; only the set properties change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartialLiffApp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<PartialLiffView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<PartialLiffFeatures>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartialLiffView {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<LiffViewType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartialLiffFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ble: Option<bool>,
}

/// Returned by `POST /liff/v1/apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiffIdResponse {
    pub liff_id: String,
}

/// Returned by `GET /liff/v1/apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LiffApps {
    pub apps: Vec<LiffApp>,
}

/// The empty object some mutations answer with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MutationSuccessResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_app_list_parses() {
        let raw = json!({
            "apps": [{
                "liffId": "1234567890-AbcdEfgh",
                "view": {"type": "full", "url": "https://example.com/myservice"},
                "description": "Happy New York",
                "features": {"ble": true}
            }, {
                "liffId": "1234567890-IjklMnop",
                "view": {"type": "tall", "url": "https://example.com/other"}
            }]
        });
        let list: LiffApps = serde_json::from_value(raw).unwrap();
        assert_eq!(list.apps[0].view.kind, LiffViewType::Full);
        assert_eq!(list.apps[0].features, Some(LiffFeatures { ble: true }));
        assert_eq!(list.apps[1].description, None);
    }

    #[test]
    fn test_partial_update_sends_only_set_fields() {
        let update = PartialLiffApp {
            view: Some(PartialLiffView {
                kind: Some(LiffViewType::Compact),
                url: None,
            }),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"view": {"type": "compact"}}));
    }
}
