//! LINE client: typed wrappers over the Messaging API endpoints.
//!
//! Every call that carries a payload validates it first. A rejected payload
//! never reaches the transport; a valid one is sent in its normalized form.

use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

use crate::audience::{
    AudienceGroup, AudienceGroupAuthorityLevel, AudienceGroupWithJob, AudienceGroups, AuthorityLevel,
    CreateClickAudienceGroupRequest, CreateUploadAudienceGroupRequest, GetAudienceGroupsOptions,
    UpdateUploadAudienceGroupRequest,
};
use crate::config::{ClientConfig, DEFAULT_ORIGIN};
use crate::error::{ErrorBody, LineError, LineResult};
use crate::insight::{
    FriendDemographics, NumberOfFollowers, NumberOfMessageDeliveries, NumberOfMessagesSentThisMonth,
    TargetLimitForAdditionalMessages,
};
use crate::liff::{LiffApp, LiffApps, LiffIdResponse, MutationSuccessResponse, NewLiffApp, PartialLiffApp};
use crate::message::Message;
use crate::narrowcast::{NarrowcastProgressResponse, NarrowcastRequest};
use crate::profile::User;
use crate::request::{BroadcastRequest, MulticastRequest, PushRequest, ReplyRequest, SendOptions};
use crate::rich_menu::{RichMenu, RichMenuIdResponse, RichMenuList, RichMenuResponse};
use crate::transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, Transport, REQUEST_ID_HEADER, RETRY_KEY_HEADER,
};
use crate::validate::{validated_with, Normalize, Validate, DEFAULT_MAX_DEPTH};

/// Messaging API client over a [`Transport`].
#[derive(Debug, Clone)]
pub struct LineClient<T: Transport = HttpTransport> {
    /// API origin, e.g. `https://api.line.me`.
    origin: Url,

    transport: T,

    /// Nesting guard handed to the validator.
    max_depth: usize,
}

impl LineClient<HttpTransport> {
    /// Client for the production origin.
    pub fn new(access_token: impl Into<String>) -> LineResult<Self> {
        Self::with_transport(HttpTransport::new(access_token), DEFAULT_ORIGIN)
    }

    /// Token, origin, timeout and depth guard from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> LineResult<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(transport, &config.origin)?.with_max_depth(config.validation.max_depth))
    }
}

impl<T: Transport> LineClient<T> {
    pub fn with_transport(transport: T, origin: &str) -> LineResult<Self> {
        let origin = Url::parse(origin)?;
        if origin.cannot_be_a_base() {
            return Err(LineError::Config(format!("origin `{origin}` cannot carry a path")));
        }
        Ok(Self {
            origin,
            transport,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Messages ─────────────────────────────────────────────

    /// Reply to an event with its reply token.
    pub async fn reply(
        &self,
        reply_token: impl Into<String>,
        messages: Vec<Message>,
        notification_disabled: bool,
    ) -> LineResult<()> {
        let body = self.prepare(
            "reply",
            ReplyRequest {
                reply_token: reply_token.into(),
                messages,
                notification_disabled: notification_disabled.then_some(true),
            },
        )?;
        let request = ApiRequest::new(HttpMethod::Post, self.endpoint("v2/bot/message/reply", &[])?).with_body(body);
        self.call(request).await?;
        Ok(())
    }

    /// Send messages to one user, group or room.
    pub async fn push(&self, to: impl Into<String>, messages: Vec<Message>, options: SendOptions) -> LineResult<()> {
        let body = self.prepare(
            "push",
            PushRequest {
                to: to.into(),
                messages,
                notification_disabled: options.flag(),
            },
        )?;
        self.send_message("v2/bot/message/push", body, options).await?;
        Ok(())
    }

    /// Send messages to up to 500 users.
    pub async fn multicast(&self, to: Vec<String>, messages: Vec<Message>, options: SendOptions) -> LineResult<()> {
        let body = self.prepare(
            "multicast",
            MulticastRequest {
                to,
                messages,
                notification_disabled: options.flag(),
            },
        )?;
        self.send_message("v2/bot/message/multicast", body, options).await?;
        Ok(())
    }

    /// Send messages to every friend of the account.
    pub async fn broadcast(&self, messages: Vec<Message>, options: SendOptions) -> LineResult<()> {
        let body = self.prepare(
            "broadcast",
            BroadcastRequest {
                messages,
                notification_disabled: options.flag(),
            },
        )?;
        self.send_message("v2/bot/message/broadcast", body, options).await?;
        Ok(())
    }

    /// Send messages to a filtered audience. Returns the request id used to
    /// poll [`narrowcast_progress`](Self::narrowcast_progress).
    pub async fn narrowcast(&self, mut request: NarrowcastRequest, options: SendOptions) -> LineResult<String> {
        if options.notification_disabled {
            request.notification_disabled = Some(true);
        }
        let body = self.prepare("narrowcast", request)?;
        let response = self.send_message("v2/bot/message/narrowcast", body, options).await?;
        response
            .header(REQUEST_ID_HEADER)
            .map(str::to_string)
            .ok_or(LineError::MissingHeader(REQUEST_ID_HEADER))
    }

    pub async fn narrowcast_progress(&self, request_id: &str) -> LineResult<NarrowcastProgressResponse> {
        let mut url = self.endpoint("v2/bot/message/progress/narrowcast", &[])?;
        url.query_pairs_mut().append_pair("requestId", request_id);
        self.get_json(url).await
    }

    // ── Profile ──────────────────────────────────────────────

    pub async fn get_profile(&self, user_id: &str) -> LineResult<User> {
        self.get_json(self.endpoint("v2/bot/profile", &[user_id])?).await
    }

    // ── Rich menus ───────────────────────────────────────────

    /// Register a rich menu and return its id.
    pub async fn create_rich_menu(&self, menu: RichMenu) -> LineResult<String> {
        let body = self.prepare("create_rich_menu", menu)?;
        let request = ApiRequest::new(HttpMethod::Post, self.endpoint("v2/bot/richmenu", &[])?).with_body(body);
        let created: RichMenuIdResponse = self.call(request).await?.json()?;
        Ok(created.rich_menu_id)
    }

    pub async fn list_rich_menus(&self) -> LineResult<Vec<RichMenuResponse>> {
        let list: RichMenuList = self.get_json(self.endpoint("v2/bot/richmenu/list", &[])?).await?;
        Ok(list.richmenus)
    }

    pub async fn delete_rich_menu(&self, rich_menu_id: &str) -> LineResult<()> {
        let url = self.endpoint("v2/bot/richmenu", &[rich_menu_id])?;
        self.call(ApiRequest::new(HttpMethod::Delete, url)).await?;
        Ok(())
    }

    pub async fn link_rich_menu(&self, user_id: &str, rich_menu_id: &str) -> LineResult<()> {
        let url = self.endpoint("v2/bot/user", &[user_id, "richmenu", rich_menu_id])?;
        self.call(ApiRequest::new(HttpMethod::Post, url)).await?;
        Ok(())
    }

    /// Make a rich menu the default for every user.
    pub async fn set_default_rich_menu(&self, rich_menu_id: &str) -> LineResult<()> {
        let url = self.endpoint("v2/bot/user/all/richmenu", &[rich_menu_id])?;
        self.call(ApiRequest::new(HttpMethod::Post, url)).await?;
        Ok(())
    }

    // ── Insight ──────────────────────────────────────────────

    pub async fn number_of_message_deliveries(&self, date: NaiveDate) -> LineResult<NumberOfMessageDeliveries> {
        self.get_json(self.dated("v2/bot/insight/message/delivery", date)?).await
    }

    pub async fn number_of_followers(&self, date: NaiveDate) -> LineResult<NumberOfFollowers> {
        self.get_json(self.dated("v2/bot/insight/followers", date)?).await
    }

    pub async fn friend_demographics(&self) -> LineResult<FriendDemographics> {
        self.get_json(self.endpoint("v2/bot/insight/demographic", &[])?).await
    }

    pub async fn target_limit(&self) -> LineResult<TargetLimitForAdditionalMessages> {
        self.get_json(self.endpoint("v2/bot/message/quota", &[])?).await
    }

    pub async fn messages_sent_this_month(&self) -> LineResult<NumberOfMessagesSentThisMonth> {
        self.get_json(self.endpoint("v2/bot/message/quota/consumption", &[])?).await
    }

    // ── Audiences ────────────────────────────────────────────

    /// Create an audience of users who clicked a URL in a sent message.
    pub async fn create_click_audience_group(
        &self,
        request: CreateClickAudienceGroupRequest,
    ) -> LineResult<AudienceGroup> {
        let body = self.prepare("create_click_audience_group", request)?;
        let url = self.endpoint("v2/bot/audienceGroup/click", &[])?;
        self.call(ApiRequest::new(HttpMethod::Post, url).with_body(body)).await?.json()
    }

    /// Create an audience from user IDs or IFAs.
    pub async fn create_upload_audience_group(
        &self,
        request: CreateUploadAudienceGroupRequest,
    ) -> LineResult<AudienceGroup> {
        let body = self.prepare("create_upload_audience_group", request)?;
        let url = self.endpoint("v2/bot/audienceGroup/upload", &[])?;
        self.call(ApiRequest::new(HttpMethod::Post, url).with_body(body)).await?.json()
    }

    /// Add members to an upload audience, optionally renaming it.
    pub async fn update_upload_audience_group(&self, request: UpdateUploadAudienceGroupRequest) -> LineResult<()> {
        let body = self.prepare("update_upload_audience_group", request)?;
        let url = self.endpoint("v2/bot/audienceGroup/upload", &[])?;
        self.call(ApiRequest::new(HttpMethod::Put, url).with_body(body)).await?;
        Ok(())
    }

    pub async fn list_audience_groups(&self, options: GetAudienceGroupsOptions) -> LineResult<AudienceGroups> {
        let options = self.checked("list_audience_groups", options)?;
        let mut url = self.endpoint("v2/bot/audienceGroup/list", &[])?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in options.to_query() {
                query.append_pair(key, &value);
            }
        }
        self.get_json(url).await
    }

    pub async fn get_audience_group(&self, audience_group_id: i64) -> LineResult<AudienceGroupWithJob> {
        let id = audience_group_id.to_string();
        self.get_json(self.endpoint("v2/bot/audienceGroup", &[&id])?).await
    }

    pub async fn delete_audience_group(&self, audience_group_id: i64) -> LineResult<()> {
        let id = audience_group_id.to_string();
        let url = self.endpoint("v2/bot/audienceGroup", &[&id])?;
        self.call(ApiRequest::new(HttpMethod::Delete, url)).await?;
        Ok(())
    }

    pub async fn get_authority_level(&self) -> LineResult<AudienceGroupAuthorityLevel> {
        self.get_json(self.endpoint("v2/bot/audienceGroup/authorityLevel", &[])?).await
    }

    pub async fn set_authority_level(&self, authority_level: AuthorityLevel) -> LineResult<()> {
        let body = serde_json::to_value(AudienceGroupAuthorityLevel { authority_level })?;
        let url = self.endpoint("v2/bot/audienceGroup/authorityLevel", &[])?;
        self.call(ApiRequest::new(HttpMethod::Put, url).with_body(body)).await?;
        Ok(())
    }

    // ── LIFF ─────────────────────────────────────────────────

    pub async fn list_liff_apps(&self) -> LineResult<Vec<LiffApp>> {
        let list: LiffApps = self.get_json(self.endpoint("liff/v1/apps", &[])?).await?;
        Ok(list.apps)
    }

    /// Register a LIFF app and return its id.
    pub async fn create_liff_app(&self, app: NewLiffApp) -> LineResult<String> {
        let body = self.prepare("create_liff_app", app)?;
        let request = ApiRequest::new(HttpMethod::Post, self.endpoint("liff/v1/apps", &[])?).with_body(body);
        let created: LiffIdResponse = self.call(request).await?.json()?;
        Ok(created.liff_id)
    }

    /// Change the set properties of a LIFF app.
    pub async fn update_liff_app(
        &self,
        liff_id: &str,
        update: PartialLiffApp,
    ) -> LineResult<MutationSuccessResponse> {
        let body = self.prepare("update_liff_app", update)?;
        let url = self.endpoint("liff/v1/apps", &[liff_id])?;
        let response = self.call(ApiRequest::new(HttpMethod::Put, url).with_body(body)).await?;
        if response.body.trim().is_empty() {
            return Ok(MutationSuccessResponse {});
        }
        response.json()
    }

    pub async fn delete_liff_app(&self, liff_id: &str) -> LineResult<()> {
        let url = self.endpoint("liff/v1/apps", &[liff_id])?;
        self.call(ApiRequest::new(HttpMethod::Delete, url)).await?;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────

    /// Validate and normalize, logging a rejection.
    fn checked<P: Validate + Normalize>(&self, operation: &'static str, payload: P) -> LineResult<P> {
        validated_with(payload, self.max_depth).map_err(|errors| {
            tracing::warn!(operation, errors = errors.len(), "payload rejected before sending");
            LineError::Invalid(errors)
        })
    }

    /// [`checked`](Self::checked), then serialize the normalized payload.
    fn prepare<P>(&self, operation: &'static str, payload: P) -> LineResult<serde_json::Value>
    where
        P: Validate + Normalize + Serialize,
    {
        let payload = self.checked(operation, payload)?;
        Ok(serde_json::to_value(&payload)?)
    }

    /// `path` is split on `/`; each entry of `params` becomes one escaped segment.
    fn endpoint(&self, path: &str, params: &[&str]) -> LineResult<Url> {
        let mut url = self.origin.clone();
        url.path_segments_mut()
            .map_err(|_| LineError::Config(format!("origin `{}` cannot carry a path", self.origin)))?
            .pop_if_empty()
            .extend(path.split('/'))
            .extend(params);
        Ok(url)
    }

    fn dated(&self, path: &str, date: NaiveDate) -> LineResult<Url> {
        let mut url = self.endpoint(path, &[])?;
        url.query_pairs_mut()
            .append_pair("date", &date.format("%Y%m%d").to_string());
        Ok(url)
    }

    async fn send_message(
        &self,
        path: &str,
        body: serde_json::Value,
        options: SendOptions,
    ) -> LineResult<ApiResponse> {
        let mut request = ApiRequest::new(HttpMethod::Post, self.endpoint(path, &[])?).with_body(body);
        if let Some(key) = options.retry_key {
            request = request.with_header(RETRY_KEY_HEADER, key.to_string());
        }
        self.call(request).await
    }

    async fn get_json<R: serde::de::DeserializeOwned>(&self, url: Url) -> LineResult<R> {
        self.call(ApiRequest::new(HttpMethod::Get, url)).await?.json()
    }

    async fn call(&self, request: ApiRequest) -> LineResult<ApiResponse> {
        let response = self.transport.send(request).await?;
        check_status(response)
    }
}

/// Map a non-2xx response to [`LineError::Api`], parsing LINE's error body
/// when there is one.
fn check_status(response: ApiResponse) -> LineResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let body = serde_json::from_str::<ErrorBody>(&response.body).unwrap_or_else(|_| ErrorBody {
        message: match response.body.trim() {
            "" => format!("HTTP {}", response.status),
            raw => raw.to_string(),
        },
        details: Vec::new(),
    });
    tracing::debug!(status = response.status, message = %body.message, "LINE API returned an error");
    Err(LineError::Api {
        status: response.status,
        message: body.message,
        details: body.details,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::action::TemplateAction;
    use crate::audience::Audience;
    use crate::liff::{LiffViewType, PartialLiffView};
    use crate::rich_menu::{RichMenuArea, RichMenuBounds, RichMenuSize};
    use crate::validate::ErrorCode;

    /// Records every request and answers with a canned response.
    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<ApiRequest>>,
        response: ApiResponse,
    }

    impl Recorder {
        fn answering(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response: ApiResponse {
                    status,
                    headers: vec![("x-line-request-id".into(), "req-1".into())],
                    body: body.into(),
                },
            })
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: ApiRequest) -> LineResult<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    fn client(recorder: &Arc<Recorder>) -> LineClient<Arc<Recorder>> {
        LineClient::with_transport(recorder.clone(), "https://api.line.me").unwrap()
    }

    #[tokio::test]
    async fn test_invalid_push_is_not_sent() {
        let recorder = Recorder::answering(200, "{}");
        let err = client(&recorder)
            .push("U1", Vec::new(), SendOptions::default())
            .await
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.errors[0].code, ErrorCode::StructuralBoundViolation);
        assert_eq!(errors.errors[0].path.to_string(), "messages");
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_push_carries_retry_key_and_flag() {
        let recorder = Recorder::answering(200, "{}");
        let options = SendOptions {
            notification_disabled: true,
            ..SendOptions::with_retry_key()
        };
        client(&recorder)
            .push("U1", vec![Message::text("hi")], options)
            .await
            .unwrap();

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url.as_str(), "https://api.line.me/v2/bot/message/push");
        let key = options.retry_key.unwrap().to_string();
        assert_eq!(sent[0].header("x-line-retry-key"), Some(key.as_str()));
        assert_eq!(
            sent[0].body,
            Some(json!({
                "to": "U1",
                "messages": [{"type": "text", "text": "hi"}],
                "notificationDisabled": true
            }))
        );
    }

    #[tokio::test]
    async fn test_narrowcast_returns_request_id() {
        let recorder = Recorder::answering(202, "{}");
        let id = client(&recorder)
            .narrowcast(NarrowcastRequest::new(vec![Message::text("sale")]).max(100), SendOptions::default())
            .await
            .unwrap();
        assert_eq!(id, "req-1");
        assert_eq!(recorder.sent()[0].body.as_ref().unwrap()["limit"], json!({"max": 100}));
    }

    #[tokio::test]
    async fn test_insight_date_format() {
        let recorder = Recorder::answering(200, r#"{"status": "unready"}"#);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        client(&recorder).number_of_followers(date).await.unwrap();
        assert_eq!(
            recorder.sent()[0].url.as_str(),
            "https://api.line.me/v2/bot/insight/followers?date=20240309"
        );
    }

    #[tokio::test]
    async fn test_path_params_are_escaped() {
        let recorder = Recorder::answering(200, "{}");
        client(&recorder).link_rich_menu("U 1", "richmenu-1").await.unwrap();
        let sent = recorder.sent();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(
            sent[0].url.as_str(),
            "https://api.line.me/v2/bot/user/U%201/richmenu/richmenu-1"
        );
    }

    #[tokio::test]
    async fn test_create_rich_menu_parses_id() {
        let recorder = Recorder::answering(200, r#"{"richMenuId": "richmenu-abc"}"#);
        let menu = RichMenu {
            size: RichMenuSize::COMPACT,
            selected: true,
            name: "main".into(),
            chat_bar_text: "Menu".into(),
            areas: vec![RichMenuArea {
                bounds: RichMenuBounds {
                    x: 0,
                    y: 0,
                    width: 2500,
                    height: 843,
                },
                action: TemplateAction::message("Hi", "hello"),
            }],
        };
        let id = client(&recorder).create_rich_menu(menu).await.unwrap();
        assert_eq!(id, "richmenu-abc");
    }

    #[tokio::test]
    async fn test_audience_list_query() {
        let recorder = Recorder::answering(
            200,
            r#"{"audienceGroups": [], "hasNextPage": false, "totalCount": 0, "page": 2, "size": 10}"#,
        );
        let options = GetAudienceGroupsOptions {
            page: Some(2),
            size: Some(10),
            ..Default::default()
        };
        let groups = client(&recorder).list_audience_groups(options).await.unwrap();
        assert_eq!(groups.page, 2);
        assert_eq!(
            recorder.sent()[0].url.as_str(),
            "https://api.line.me/v2/bot/audienceGroup/list?page=2&size=10"
        );
    }

    #[tokio::test]
    async fn test_audience_list_rejects_oversized_page() {
        let recorder = Recorder::answering(200, "{}");
        let options = GetAudienceGroupsOptions {
            size: Some(41),
            ..Default::default()
        };
        let err = client(&recorder).list_audience_groups(options).await.unwrap_err();
        assert!(matches!(err, LineError::Invalid(_)));
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_error_body_is_parsed() {
        let recorder = Recorder::answering(
            400,
            r#"{"message": "The request body has 1 error(s)",
                "details": [{"message": "May not be empty", "property": "messages[0].text"}]}"#,
        );
        let err = client(&recorder).get_profile("U1").await.unwrap_err();
        match err {
            LineError::Api { status, message, details } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The request body has 1 error(s)");
                assert_eq!(details[0].property.as_deref(), Some("messages[0].text"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_body_kept_verbatim() {
        let err = check_status(ApiResponse {
            status: 502,
            headers: Vec::new(),
            body: "Bad Gateway".into(),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "LINE API error 502: Bad Gateway");

        let err = check_status(ApiResponse {
            status: 500,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "LINE API error 500: HTTP 500");
    }

    #[test]
    fn test_origin_must_be_a_base() {
        let recorder = Recorder::answering(200, "{}");
        assert!(matches!(
            LineClient::with_transport(recorder, "mailto:bot@example.com"),
            Err(LineError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_audience_posts_members() {
        let recorder = Recorder::answering(
            202,
            r#"{"audienceGroupId": 4389303728991, "type": "UPLOAD", "description": "spring sale", "created": 1613698278}"#,
        );
        let request = CreateUploadAudienceGroupRequest::new("spring sale", vec![Audience::new("U1")]);
        let group = client(&recorder).create_upload_audience_group(request).await.unwrap();
        assert_eq!(group.audience_group_id, 4389303728991);

        let sent = recorder.sent();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url.as_str(), "https://api.line.me/v2/bot/audienceGroup/upload");
        assert_eq!(
            sent[0].body,
            Some(json!({"description": "spring sale", "audiences": [{"id": "U1"}]}))
        );
    }

    #[tokio::test]
    async fn test_empty_upload_update_is_not_sent() {
        let recorder = Recorder::answering(200, "{}");
        let request = UpdateUploadAudienceGroupRequest::new(4389303728991, Vec::new());
        let err = client(&recorder).update_upload_audience_group(request).await.unwrap_err();
        assert_eq!(err.validation_errors().unwrap().errors[0].path.to_string(), "audiences");
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_liff_update_accepts_empty_body() {
        let recorder = Recorder::answering(200, "");
        let update = PartialLiffApp {
            view: Some(PartialLiffView {
                kind: Some(LiffViewType::Tall),
                url: None,
            }),
            ..Default::default()
        };
        let response = client(&recorder).update_liff_app("1234567890-AbcdEfgh", update).await.unwrap();
        assert_eq!(response, MutationSuccessResponse {});

        let sent = recorder.sent();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].url.as_str(), "https://api.line.me/liff/v1/apps/1234567890-AbcdEfgh");
        assert_eq!(sent[0].body, Some(json!({"view": {"type": "tall"}})));
    }
}
