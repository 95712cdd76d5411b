//! Action objects: what happens when a user taps a button, area or component.
//!
//! The same seven kinds are used by templates, quick replies, flex
//! components and rich menus; which kinds and label rules apply depends on
//! where the action is placed (see [`ActionContext`](crate::validate::ActionContext)).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An action object, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum TemplateAction {
    #[serde(rename = "postback")]
    Postback(PostbackAction),

    #[serde(rename = "message")]
    Message(MessageAction),

    #[serde(rename = "uri")]
    Uri(UriAction),

    #[serde(rename = "datetimepicker")]
    DatetimePicker(DatetimePickerAction),

    /// Quick reply only.
    #[serde(rename = "camera")]
    Camera(CameraAction),

    /// Quick reply only.
    #[serde(rename = "cameraRoll")]
    CameraRoll(CameraRollAction),

    /// Quick reply only.
    #[serde(rename = "location")]
    Location(LocationAction),
}

impl TemplateAction {
    /// Wire discriminant of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            TemplateAction::Postback(_) => "postback",
            TemplateAction::Message(_) => "message",
            TemplateAction::Uri(_) => "uri",
            TemplateAction::DatetimePicker(_) => "datetimepicker",
            TemplateAction::Camera(_) => "camera",
            TemplateAction::CameraRoll(_) => "cameraRoll",
            TemplateAction::Location(_) => "location",
        }
    }

    /// The action's label, if it has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            TemplateAction::Postback(a) => a.label.as_deref(),
            TemplateAction::Message(a) => a.label.as_deref(),
            TemplateAction::Uri(a) => a.label.as_deref(),
            TemplateAction::DatetimePicker(a) => a.label.as_deref(),
            TemplateAction::Camera(a) => Some(&a.label),
            TemplateAction::CameraRoll(a) => Some(&a.label),
            TemplateAction::Location(a) => Some(&a.label),
        }
    }

    /// Convenience: a labelled postback action.
    pub fn postback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Postback(PostbackAction {
            label: Some(label.into()),
            ..PostbackAction::new(data)
        })
    }

    /// Convenience: a labelled message action.
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message(MessageAction {
            label: Some(label.into()),
            text: text.into(),
        })
    }

    /// Convenience: a labelled URI action.
    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::Uri(UriAction {
            label: Some(label.into()),
            uri: uri.into(),
        })
    }
}

/// Returns `data` to the webhook in a postback event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostbackAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Returned in `postback.data` (max 300 characters).
    pub data: String,

    /// Deprecated; cannot be combined with `display_text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Shown in the chat as if sent by the user; cannot be combined with `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl PostbackAction {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }
}

/// Sends `text` as a message from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub text: String,
}

/// Opens `uri` (http, https, line or tel schemes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UriAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub uri: String,
}

/// What the datetime picker lets the user choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatetimePickerMode {
    Date,
    Time,
    Datetime,
}

/// Opens a date/time picker and returns the selection in a postback event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatetimePickerAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub data: String,

    pub mode: DatetimePickerMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,

    /// Must be later than `min`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CameraAction {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CameraRollAction {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationAction {
    pub label: String,
}
