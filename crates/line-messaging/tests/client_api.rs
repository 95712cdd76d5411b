//! HTTP-level client behaviour against a mock API.

use line_messaging::audience::{Audience, CreateUploadAudienceGroupRequest, UpdateUploadAudienceGroupRequest};
use line_messaging::filter::{DemographicObject, Gender, OneOf};
use line_messaging::flex::{FlexSpan, FlexText};
use line_messaging::liff::{LiffViewType, NewLiffApp};
use line_messaging::narrowcast::NarrowcastPhase;
use line_messaging::{
    FilterNode, FlexBox, FlexBubble, FlexComponent, FlexContainer, HttpTransport, LineClient, LineError, Message,
    NarrowcastRequest, SendOptions,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> LineClient {
    LineClient::with_transport(HttpTransport::new("test-token"), &server.uri()).unwrap()
}

#[tokio::test]
async fn test_invalid_message_sends_nothing() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    let err = client
        .push("U1", vec![Message::text("x".repeat(5001))], SendOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LineError::Invalid(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_valid_message_sends_normalized_json() {
    let server = MockServer::start().await;
    let mut text = FlexText::new("dropped");
    text.contents = Some(vec![FlexSpan::new("kept")]);
    let bubble = FlexBubble::with_body(FlexBox::vertical(vec![FlexComponent::Text(text)]));

    Mock::given(method("POST"))
        .and(path("/v2/bot/message/push"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_exists("x-line-retry-key"))
        .and(body_json(json!({
            "to": "U1",
            "messages": [{
                "type": "flex",
                "altText": "hello",
                "contents": {
                    "type": "bubble",
                    "body": {
                        "type": "box",
                        "layout": "vertical",
                        "contents": [{
                            "type": "text",
                            "contents": [{"type": "span", "text": "kept"}]
                        }]
                    }
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .push(
            "U1",
            vec![Message::flex("hello", FlexContainer::Bubble(bubble))],
            SendOptions::with_retry_key(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_response_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/broadcast"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "You have reached your monthly limit."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .broadcast(vec![Message::text("hi")], SendOptions::default())
        .await
        .unwrap_err();

    match err {
        LineError::Api { status, message, details } => {
            assert_eq!(status, 429);
            assert_eq!(message, "You have reached your monthly limit.");
            assert!(details.is_empty());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_narrowcast_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/narrowcast"))
        .respond_with(ResponseTemplate::new(202).insert_header("X-Line-Request-Id", "7a1b2c3d"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/message/progress/narrowcast"))
        .and(query_param("requestId", "7a1b2c3d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "phase": "succeeded",
            "successCount": 10,
            "failureCount": 0,
            "targetCount": 10,
            "acceptedTime": "2024-03-09T10:00:00.000Z",
            "completedTime": "2024-03-09T10:00:05.000Z"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = NarrowcastRequest::new(vec![Message::text("sale")])
        .demographic(FilterNode::leaf(DemographicObject::Gender(OneOf::new(vec![Gender::Female]))));
    let request_id = client.narrowcast(request, SendOptions::default()).await.unwrap();
    assert_eq!(request_id, "7a1b2c3d");

    let progress = client.narrowcast_progress(&request_id).await.unwrap();
    assert_eq!(progress.phase, NarrowcastPhase::Succeeded);
    assert_eq!(progress.target_count, Some(10));
}

#[tokio::test]
async fn test_narrowcast_without_request_id_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/narrowcast"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .narrowcast(NarrowcastRequest::new(vec![Message::text("sale")]), SendOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LineError::MissingHeader("X-Line-Request-Id")));
}

#[tokio::test]
async fn test_get_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/profile/U4af4980629"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "displayName": "LINE taro",
            "userId": "U4af4980629",
            "language": "en",
            "pictureUrl": "https://obs.line-apps.com/abc"
        })))
        .mount(&server)
        .await;

    let user = client_for(&server).await.get_profile("U4af4980629").await.unwrap();
    assert_eq!(user.display_name, "LINE taro");
    assert_eq!(user.status_message, None);
}

#[tokio::test]
async fn test_upload_audience_create_and_extend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/audienceGroup/upload"))
        .and(body_json(json!({
            "description": "spring sale",
            "uploadDescription": "first batch",
            "audiences": [{"id": "U1"}, {"id": "U2"}]
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "audienceGroupId": 4389303728991_i64,
            "type": "UPLOAD",
            "description": "spring sale",
            "created": 1613698278,
            "permission": "READ_WRITE"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2/bot/audienceGroup/upload"))
        .and(body_json(json!({
            "audienceGroupId": 4389303728991_i64,
            "audiences": [{"id": "U3"}]
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let members = vec![Audience::new("U1"), Audience::new("U2")];
    let mut request = CreateUploadAudienceGroupRequest::new("spring sale", members);
    request.upload_description = Some("first batch".into());
    let group = client.create_upload_audience_group(request).await.unwrap();
    assert_eq!(group.audience_group_id, 4389303728991);

    let update = UpdateUploadAudienceGroupRequest::new(group.audience_group_id, vec![Audience::new("U3")]);
    client.update_upload_audience_group(update).await.unwrap();
}

#[tokio::test]
async fn test_liff_app_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/liff/v1/apps"))
        .and(body_json(json!({"view": {"type": "full", "url": "https://example.com/app"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liffId": "1234567890-AbcdEfgh"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/liff/v1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apps": [{
                "liffId": "1234567890-AbcdEfgh",
                "view": {"type": "full", "url": "https://example.com/app"}
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/liff/v1/apps/1234567890-AbcdEfgh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let liff_id = client
        .create_liff_app(NewLiffApp::new(LiffViewType::Full, "https://example.com/app"))
        .await
        .unwrap();
    assert_eq!(liff_id, "1234567890-AbcdEfgh");

    let apps = client.list_liff_apps().await.unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].view.kind, LiffViewType::Full);

    client.delete_liff_app(&liff_id).await.unwrap();
}

#[tokio::test]
async fn test_liff_app_with_plain_http_is_rejected() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .await
        .create_liff_app(NewLiffApp::new(LiffViewType::Compact, "http://example.com/app"))
        .await
        .unwrap_err();
    assert!(matches!(err, LineError::Invalid(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
