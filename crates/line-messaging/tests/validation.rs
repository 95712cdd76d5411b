//! Whole-tree validation through the public API.

use line_messaging::action::{DatetimePickerAction, DatetimePickerMode, PostbackAction, TemplateAction};
use line_messaging::filter::{
    AudienceObject, DemographicAge, DemographicObject, Gender, OneOf, RangeBound,
};
use line_messaging::flex::{BubbleSize, FlexSpan, FlexText};
use line_messaging::narrowcast::NarrowcastRequest;
use line_messaging::template::{ButtonsTemplate, CarouselColumn, CarouselTemplate};
use line_messaging::validate::{ErrorCode, DEFAULT_MAX_DEPTH};
use line_messaging::{
    validated, validated_with, DemographicFilterObject, FilterNode, FlexBox, FlexBubble, FlexCarousel,
    FlexComponent, FlexContainer, Message, QuickReply, RecipientObject, Template, Validate,
};
use pretty_assertions::assert_eq;

fn nested_boxes(depth: usize) -> FlexBox {
    let mut node = FlexBox::vertical(vec![FlexComponent::text("leaf")]);
    for _ in 1..depth {
        node = FlexBox::vertical(vec![node.into()]);
    }
    node
}

fn shop_bubble() -> FlexBubble {
    FlexBubble::with_body(FlexBox::vertical(vec![
        FlexComponent::text("Brown Cafe"),
        FlexBox::horizontal(vec![FlexComponent::text("Place"), FlexComponent::text("Shinjuku")]).into(),
    ]))
}

#[test]
fn test_valid_payloads_have_no_errors() {
    let buttons = ButtonsTemplate::new(
        "Please select",
        vec![
            TemplateAction::postback("Buy", "action=buy&itemid=123"),
            TemplateAction::message("Add", "add to cart"),
            TemplateAction::uri("View", "https://example.com/page/123"),
        ],
    );
    let carousel = FlexContainer::Carousel(FlexCarousel {
        contents: vec![shop_bubble(), shop_bubble()],
    });
    let messages = vec![
        Message::text("Hello"),
        Message::template("menu", Template::Buttons(buttons)),
        Message::flex("shops", carousel),
    ];
    for message in &messages {
        assert!(message.validate().is_ok(), "{message:?}");
    }

    let audience: DemographicFilterObject = FilterNode::and(vec![
        DemographicObject::Gender(OneOf::new(vec![Gender::Male])).into(),
        DemographicObject::Age(RangeBound::Gte(DemographicAge::Age20)).into(),
    ]);
    let request = NarrowcastRequest::new(messages[..2].to_vec())
        .recipient(FilterNode::leaf(AudienceObject::new(5614991017776)))
        .demographic(audience)
        .max(100);
    assert!(request.validate().is_ok());
}

#[test]
fn test_empty_quick_reply_is_reported() {
    let message = Message::text("hi").with_quick_reply(QuickReply::default());
    let errors = message.validate().unwrap_err();
    assert_eq!(errors.errors[0].path.to_string(), "quickReply.items");
}

#[test]
fn test_postback_data_limit() {
    let errors = PostbackAction::new("x".repeat(301)).validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    let error = &errors.errors[0];
    assert_eq!(error.code, ErrorCode::FieldConstraintViolation);
    assert_eq!(error.path.to_string(), "data");
    assert_eq!(error.constraint.to_string(), "maxLength:300");
    assert_eq!(error.actual.as_deref(), Some("301 characters"));

    assert!(PostbackAction::new("x".repeat(300)).validate().is_ok());
}

#[test]
fn test_carousel_column_limit() {
    let columns = (0..11)
        .map(|i| CarouselColumn::new(format!("item {i}"), vec![TemplateAction::postback("Buy", "buy")]))
        .collect();
    let errors = CarouselTemplate::new(columns).validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors[0].code, ErrorCode::StructuralBoundViolation);
    assert_eq!(errors.errors[0].path.to_string(), "columns");
    assert_eq!(errors.errors[0].constraint.to_string(), "max:10");
}

#[test]
fn test_deep_box_nesting_stops_at_guard() {
    let message = Message::flex("deep", FlexContainer::Bubble(FlexBubble::with_body(nested_boxes(100))));
    let errors = message.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors[0].code, ErrorCode::DepthExceeded);
    assert_eq!(
        errors.errors[0].constraint.to_string(),
        format!("maxDepth:{DEFAULT_MAX_DEPTH}")
    );

    // Exactly at the guard is still fine.
    let shallow = FlexContainer::Bubble(FlexBubble::with_body(nested_boxes(8)));
    assert!(validated_with(shallow.clone(), 8).is_ok());
    assert!(validated_with(shallow, 7).is_err());
}

#[test]
fn test_mixed_bubble_sizes_reported_once() {
    let mut bubbles: Vec<FlexBubble> = (0..4).map(|_| shop_bubble()).collect();
    bubbles[1].size = Some(BubbleSize::Micro);
    bubbles[3].size = Some(BubbleSize::Giga);
    let message = Message::flex("shops", FlexContainer::Carousel(FlexCarousel { contents: bubbles }));

    let errors = message.validate().unwrap_err();
    let cross: Vec<_> = errors.with_code(ErrorCode::CrossChildInvariantViolation).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(cross.len(), 1);
    assert_eq!(cross[0].path.to_string(), "contents.contents");
}

#[test]
fn test_empty_operators_reported_at_each_node() {
    let recipient: RecipientObject = FilterNode::or(vec![
        AudienceObject::new(1).into(),
        FilterNode::and(vec![]),
        FilterNode::not(vec![]),
    ]);
    let request = NarrowcastRequest::new(vec![Message::text("sale")]).recipient(recipient);
    let errors = request.validate().unwrap_err();
    let paths: Vec<String> = errors
        .with_code(ErrorCode::EmptyOperatorList)
        .map(|e| e.path.to_string())
        .collect();
    assert_eq!(paths, vec!["recipient.or[1].and", "recipient.or[2].not"]);
}

#[test]
fn test_errors_are_collected_in_one_pass() {
    let picker = TemplateAction::DatetimePicker(DatetimePickerAction {
        label: Some("Pick".into()),
        data: "d".into(),
        mode: DatetimePickerMode::Date,
        initial: Some("2024-13-01".into()),
        max: None,
        min: None,
    });
    let buttons = ButtonsTemplate::new(
        "x".repeat(161),
        vec![picker, TemplateAction::postback("Buy", "y".repeat(301))],
    );
    let errors = Message::template("alt", Template::Buttons(buttons)).validate().unwrap_err();
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "template.text",
            "template.actions[0].initial",
            "template.actions[1].data",
        ]
    );
}

#[test]
fn test_text_spans_win_over_text() {
    let mut text = FlexText::new("ignored");
    text.contents = Some(vec![FlexSpan::new("Hello, "), FlexSpan::new("world")]);
    let bubble = FlexBubble::with_body(FlexBox::vertical(vec![FlexComponent::Text(text)]));
    let message = validated(Message::flex("greeting", FlexContainer::Bubble(bubble))).unwrap();

    let json = serde_json::to_value(&message).unwrap();
    let text = &json["contents"]["body"]["contents"][0];
    assert_eq!(text.get("text"), None);
    assert_eq!(text["contents"][1]["text"], "world");
}

#[test]
fn test_normalizing_is_idempotent() {
    let mut text = FlexText::new("ignored");
    text.contents = Some(vec![FlexSpan::new("span")]);
    let bubble = FlexBubble::with_body(FlexBox::vertical(vec![
        FlexComponent::Text(text),
        FlexBox::horizontal(vec![FlexComponent::text("plain")]).into(),
    ]));
    let message = Message::flex("alt", FlexContainer::Bubble(bubble));

    let once = validated(message).unwrap();
    let twice = validated(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_unknown_tag_is_a_parse_error() {
    let raw = r#"{"type": "flex", "altText": "x", "contents": {"type": "bubble", "body": {
        "type": "box", "layout": "vertical", "contents": [{"type": "video"}]}}}"#;
    assert!(serde_json::from_str::<Message>(raw).is_err());
}
