//! Rich menus: the tappable image menu shown under the chat.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::TemplateAction;

/// The six image sizes (pixels) a rich menu may use.
pub const RICH_MENU_SIZES: &[(i64, i64)] = &[
    (2500, 1686),
    (2500, 843),
    (1200, 810),
    (1200, 405),
    (800, 540),
    (800, 270),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RichMenu {
    pub size: RichMenuSize,

    /// Display the menu by default.
    pub selected: bool,

    /// Not shown to users (max 300 characters).
    pub name: String,

    /// Text in the chat bar (max 14 characters).
    pub chat_bar_text: String,

    /// Max 20 areas.
    pub areas: Vec<RichMenuArea>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RichMenuSize {
    pub width: i64,
    pub height: i64,
}

impl RichMenuSize {
    /// 2500×1686, the full-height menu.
    pub const LARGE: RichMenuSize = RichMenuSize {
        width: 2500,
        height: 1686,
    };

    /// 2500×843, the half-height menu.
    pub const COMPACT: RichMenuSize = RichMenuSize {
        width: 2500,
        height: 843,
    };

    pub fn is_supported(&self) -> bool {
        RICH_MENU_SIZES.contains(&(self.width, self.height))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RichMenuArea {
    pub bounds: RichMenuBounds,
    pub action: TemplateAction,
}

/// A rectangle in menu-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RichMenuBounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Returned by `POST /v2/bot/richmenu`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuIdResponse {
    pub rich_menu_id: String,
}

/// A registered rich menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RichMenuResponse {
    pub rich_menu_id: String,

    #[serde(flatten)]
    pub menu: RichMenu,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RichMenuList {
    pub richmenus: Vec<RichMenuResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_menu_response_flattens_menu() {
        let raw = r#"{
            "richMenuId": "richmenu-88c05ef6921ae53f8b58a25f3a65faf7",
            "size": {"width": 2500, "height": 1686},
            "selected": false,
            "name": "Nice richmenu",
            "chatBarText": "Tap here",
            "areas": [{
                "bounds": {"x": 0, "y": 0, "width": 2500, "height": 1686},
                "action": {"type": "postback", "data": "action=buy&itemid=123"}
            }]
        }"#;
        let parsed: RichMenuResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.menu.size, RichMenuSize::LARGE);
        assert_eq!(parsed.menu.areas.len(), 1);
        assert!(parsed.menu.size.is_supported());
        assert!(!RichMenuSize { width: 2500, height: 1000 }.is_supported());
    }
}
