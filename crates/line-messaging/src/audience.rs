//! Audience management: upload and click audiences, listing and authority level.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudienceGroupType {
    Upload,
    Imp,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudienceGroupStatus {
    InProgress,
    Ready,
    Failed,
    Expired,
}

impl AudienceGroupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AudienceGroupStatus::InProgress => "IN_PROGRESS",
            AudienceGroupStatus::Ready => "READY",
            AudienceGroupStatus::Failed => "FAILED",
            AudienceGroupStatus::Expired => "EXPIRED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudiencePermission {
    Read,
    ReadWrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroup {
    pub audience_group_id: i64,

    #[serde(rename = "type")]
    pub kind: AudienceGroupType,

    /// The audience's name (max 120 characters).
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AudienceGroupStatus>,

    /// Present when `status` is `FAILED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_count: Option<u64>,

    /// UNIX time.
    pub created: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ifa_audience: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<AudiencePermission>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_route: Option<String>,
}

/// Returned by `GET /v2/bot/audienceGroup/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroups {
    pub audience_groups: Vec<AudienceGroup>,
    pub has_next_page: bool,
    pub total_count: u64,
    #[serde(default)]
    pub read_write_audience_group_total_count: u64,
    pub page: u64,
    pub size: u64,
}

/// One attempt to add user IDs to an upload audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroupJob {
    pub audience_group_job_id: i64,
    pub audience_group_id: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// `QUEUED`, `WORKING`, `FINISHED` or `FAILED`.
    pub job_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_type: Option<String>,
    pub audience_count: u64,
    pub created: i64,
}

/// Returned by `GET /v2/bot/audienceGroup/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroupWithJob {
    pub audience_group: AudienceGroup,
    #[serde(default)]
    pub jobs: Vec<AudienceGroupJob>,
}

/// Body of `POST /v2/bot/audienceGroup/click`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClickAudienceGroupRequest {
    /// Max 120 characters.
    pub description: String,

    /// Request ID of a message sent in the last 60 days.
    pub request_id: String,

    /// Omitted: users who clicked any URL in the message (max 2000 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_url: Option<String>,
}

/// One member of an upload audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Audience {
    /// A user ID or IFA.
    pub id: String,
}

impl Audience {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Body of `POST /v2/bot/audienceGroup/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUploadAudienceGroupRequest {
    /// Max 120 characters; unique, compared case-insensitively.
    pub description: String,

    /// `true` when `audiences` holds IFAs rather than user IDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ifa_audience: Option<bool>,

    /// Recorded as the job's `description`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_description: Option<String>,

    /// 1 to 10,000 members.
    pub audiences: Vec<Audience>,
}

impl CreateUploadAudienceGroupRequest {
    pub fn new(description: impl Into<String>, audiences: Vec<Audience>) -> Self {
        Self {
            description: description.into(),
            is_ifa_audience: None,
            upload_description: None,
            audiences,
        }
    }
}

/// Body of `PUT /v2/bot/audienceGroup/upload`: adds members to an existing
/// upload audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUploadAudienceGroupRequest {
    pub audience_group_id: i64,

    /// New name (max 120 characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_description: Option<String>,

    /// 1 to 10,000 members.
    pub audiences: Vec<Audience>,
}

impl UpdateUploadAudienceGroupRequest {
    pub fn new(audience_group_id: i64, audiences: Vec<Audience>) -> Self {
        Self {
            audience_group_id,
            description: None,
            upload_description: None,
            audiences,
        }
    }
}

/// Query for `GET /v2/bot/audienceGroup/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAudienceGroupsOptions {
    /// 1 or higher; defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Case-insensitive partial match on the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AudienceGroupStatus>,

    /// 1 to 40; defaults to 20.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes_external_public_groups: Option<bool>,

    /// `OA_MANAGER` or `MESSAGING_API`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_route: Option<String>,
}

impl GetAudienceGroupsOptions {
    /// Query string pairs; `page` is always present.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.unwrap_or(1).to_string())];
        if let Some(description) = &self.description {
            query.push(("description", description.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        if let Some(includes) = self.includes_external_public_groups {
            query.push(("includesExternalPublicGroups", includes.to_string()));
        }
        if let Some(route) = &self.create_route {
            query.push(("createRoute", route.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorityLevel {
    /// Usable from other channels linked to the bot.
    Public,
    /// Usable only in the creating channel.
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudienceGroupAuthorityLevel {
    pub authority_level: AuthorityLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_group_parses() {
        let raw = r#"{
            "audienceGroupId": 4389303728991,
            "type": "CLICK",
            "description": "audienceGroupName_01",
            "status": "READY",
            "audienceCount": 2,
            "created": 1608619802,
            "requestId": "bb9744f9-47fa-4a29-941e-1234567890ab",
            "clickUrl": "https://developers.line.biz/",
            "permission": "READ_WRITE",
            "createRoute": "MESSAGING_API"
        }"#;
        let group: AudienceGroup = serde_json::from_str(raw).unwrap();
        assert_eq!(group.kind, AudienceGroupType::Click);
        assert_eq!(group.status, Some(AudienceGroupStatus::Ready));
        assert_eq!(group.permission, Some(AudiencePermission::ReadWrite));
    }

    #[test]
    fn test_upload_request_wire_format() {
        let mut request = CreateUploadAudienceGroupRequest::new("spring sale", vec![Audience::new("U1")]);
        request.is_ifa_audience = Some(false);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "description": "spring sale",
                "isIfaAudience": false,
                "audiences": [{"id": "U1"}]
            })
        );
    }

    #[test]
    fn test_list_query_defaults_page() {
        let options = GetAudienceGroupsOptions {
            status: Some(AudienceGroupStatus::InProgress),
            size: Some(40),
            ..Default::default()
        };
        assert_eq!(
            options.to_query(),
            vec![
                ("page", "1".to_string()),
                ("status", "IN_PROGRESS".to_string()),
                ("size", "40".to_string()),
            ]
        );
    }
}
