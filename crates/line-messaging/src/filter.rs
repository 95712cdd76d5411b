//! Narrowcast targeting: recipient and demographic filter trees.
//!
//! Leaves ([`AudienceObject`], [`DemographicObject`]) are combined with
//! logical operator objects:
//!
//! ```json
//! {"type": "operator", "and": [
//!     {"type": "gender", "oneOf": ["female"]},
//!     {"type": "operator", "not": [{"type": "age", "lt": "age_20"}]}
//! ]}
//! ```

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Either a leaf predicate or an operator over further nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FilterNode<T> {
    Operator(FilterOperator<T>),
    Leaf(T),
}

impl<T> FilterNode<T> {
    pub fn and(children: Vec<FilterNode<T>>) -> Self {
        FilterNode::Operator(FilterOperator::new(LogicalOp::And(children)))
    }

    pub fn or(children: Vec<FilterNode<T>>) -> Self {
        FilterNode::Operator(FilterOperator::new(LogicalOp::Or(children)))
    }

    pub fn not(children: Vec<FilterNode<T>>) -> Self {
        FilterNode::Operator(FilterOperator::new(LogicalOp::Not(children)))
    }

    pub fn leaf(value: T) -> Self {
        FilterNode::Leaf(value)
    }

    /// Leaves in the tree, depth-first.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            FilterNode::Leaf(leaf) => out.push(leaf),
            FilterNode::Operator(op) => {
                for child in op.op.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl<T> From<T> for FilterNode<T> {
    fn from(value: T) -> Self {
        FilterNode::Leaf(value)
    }
}

/// Discriminant of an operator node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OperatorType {
    #[default]
    Operator,
}

/// `{"type": "operator"}` plus exactly one of `and`, `or`, `not`.
///
/// Parsing fails when none or more than one of the three keys is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FilterOperator<T> {
    #[serde(rename = "type")]
    pub kind: OperatorType,

    #[serde(flatten)]
    pub op: LogicalOp<T>,
}

impl<T> FilterOperator<T> {
    pub fn new(op: LogicalOp<T>) -> Self {
        Self {
            kind: OperatorType::Operator,
            op,
        }
    }
}

/// Wire shape of an operator before the single-key rule is applied.
#[derive(Deserialize)]
struct RawOperator<T> {
    #[serde(rename = "type")]
    kind: OperatorType,
    and: Option<Vec<FilterNode<T>>>,
    or: Option<Vec<FilterNode<T>>>,
    not: Option<Vec<FilterNode<T>>>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FilterOperator<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawOperator::<T>::deserialize(deserializer)?;
        let op = match (raw.and, raw.or, raw.not) {
            (Some(children), None, None) => LogicalOp::And(children),
            (None, Some(children), None) => LogicalOp::Or(children),
            (None, None, Some(children)) => LogicalOp::Not(children),
            (None, None, None) => return Err(de::Error::custom("operator needs one of `and`, `or`, `not`")),
            _ => {
                return Err(de::Error::custom(
                    "operator must carry exactly one of `and`, `or`, `not`",
                ))
            }
        };
        Ok(Self { kind: raw.kind, op })
    }
}

/// The populated operator. The list must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp<T> {
    And(Vec<FilterNode<T>>),
    Or(Vec<FilterNode<T>>),
    /// Matches when none of the children match.
    Not(Vec<FilterNode<T>>),
}

impl<T> LogicalOp<T> {
    /// JSON property name of this operator.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalOp::And(_) => "and",
            LogicalOp::Or(_) => "or",
            LogicalOp::Not(_) => "not",
        }
    }

    pub fn children(&self) -> &[FilterNode<T>] {
        match self {
            LogicalOp::And(c) | LogicalOp::Or(c) | LogicalOp::Not(c) => c,
        }
    }
}

/// Up to ten audiences combined with operators.
pub type RecipientObject = FilterNode<AudienceObject>;

pub type DemographicFilterObject = FilterNode<DemographicObject>;

// ── Recipient leaves ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AudienceType {
    #[default]
    Audience,
}

/// An audience created with the audience management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AudienceObject {
    #[serde(rename = "type")]
    pub kind: AudienceType,

    pub audience_group_id: i64,
}

impl AudienceObject {
    pub fn new(audience_group_id: i64) -> Self {
        Self {
            kind: AudienceType::Audience,
            audience_group_id,
        }
    }
}

// ── Demographic leaves ───────────────────────────────────────

/// A friend attribute criterion, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DemographicObject {
    Gender(OneOf<Gender>),
    Age(RangeBound<DemographicAge>),
    AppType(OneOf<AppType>),
    /// Values must be [`AREA_CODES`].
    Area(OneOf<String>),
    SubscriptionPeriod(RangeBound<SubscriptionPeriod>),
}

impl DemographicObject {
    pub fn kind(&self) -> &'static str {
        match self {
            DemographicObject::Gender(_) => "gender",
            DemographicObject::Age(_) => "age",
            DemographicObject::AppType(_) => "appType",
            DemographicObject::Area(_) => "area",
            DemographicObject::SubscriptionPeriod(_) => "subscriptionPeriod",
        }
    }
}

/// Matches when the attribute equals any listed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OneOf<T> {
    #[serde(rename = "oneOf")]
    pub one_of: Vec<T>,
}

impl<T> OneOf<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { one_of: values }
    }
}

/// A one-sided bound: `{"gte": X}` or `{"lt": X}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RangeBound<T> {
    Gte(T),
    Lt(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Ios,
    Android,
}

/// Age group thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum DemographicAge {
    #[serde(rename = "age_15")]
    Age15,
    #[serde(rename = "age_20")]
    Age20,
    #[serde(rename = "age_25")]
    Age25,
    #[serde(rename = "age_30")]
    Age30,
    #[serde(rename = "age_35")]
    Age35,
    #[serde(rename = "age_40")]
    Age40,
    #[serde(rename = "age_45")]
    Age45,
    #[serde(rename = "age_50")]
    Age50,
}

impl DemographicAge {
    pub fn years(self) -> u32 {
        match self {
            DemographicAge::Age15 => 15,
            DemographicAge::Age20 => 20,
            DemographicAge::Age25 => 25,
            DemographicAge::Age30 => 30,
            DemographicAge::Age35 => 35,
            DemographicAge::Age40 => 40,
            DemographicAge::Age45 => 45,
            DemographicAge::Age50 => 50,
        }
    }
}

/// Friendship duration thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum SubscriptionPeriod {
    #[serde(rename = "day_7")]
    Day7,
    #[serde(rename = "day_30")]
    Day30,
    #[serde(rename = "day_90")]
    Day90,
    #[serde(rename = "day_180")]
    Day180,
    #[serde(rename = "day_365")]
    Day365,
}

impl SubscriptionPeriod {
    pub fn days(self) -> u32 {
        match self {
            SubscriptionPeriod::Day7 => 7,
            SubscriptionPeriod::Day30 => 30,
            SubscriptionPeriod::Day90 => 90,
            SubscriptionPeriod::Day180 => 180,
            SubscriptionPeriod::Day365 => 365,
        }
    }
}

/// Region codes accepted by `area` filters.
pub const AREA_CODES: &[&str] = &[
    "jp_01", "jp_02", "jp_03", "jp_04", "jp_05", "jp_06", "jp_07", "jp_08", "jp_09", "jp_10",
    "jp_11", "jp_12", "jp_13", "jp_14", "jp_15", "jp_16", "jp_17", "jp_18", "jp_19", "jp_20",
    "jp_21", "jp_22", "jp_23", "jp_24", "jp_25", "jp_26", "jp_27", "jp_28", "jp_29", "jp_30",
    "jp_31", "jp_32", "jp_33", "jp_34", "jp_35", "jp_36", "jp_37", "jp_38", "jp_39", "jp_40",
    "jp_41", "jp_42", "jp_43", "jp_44", "jp_45", "jp_46", "jp_47", "tw_01", "tw_02", "tw_03",
    "tw_04", "tw_05", "tw_06", "tw_07", "tw_08", "tw_09", "tw_10", "tw_11", "tw_12", "tw_13",
    "tw_14", "tw_15", "tw_16", "tw_17", "tw_18", "tw_19", "tw_20", "tw_21", "tw_22", "th_01",
    "th_02", "th_03", "th_04", "th_05", "th_06", "th_07", "th_08", "id_01", "id_02", "id_03",
    "id_04", "id_05", "id_06", "id_07", "id_08", "id_09", "id_10", "id_11", "id_12",
];

// ── Records for local evaluation ─────────────────────────────

/// Known attributes of one friend. Unknown attributes never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicProfile {
    pub gender: Option<Gender>,
    /// Age in years.
    pub age: Option<u32>,
    pub app_type: Option<AppType>,
    pub area: Option<String>,
    /// Days since the user added the account as a friend.
    pub subscription_days: Option<u32>,
}

/// The audiences one user belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceMembership {
    pub audience_group_ids: BTreeSet<i64>,
}

impl AudienceMembership {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            audience_group_ids: ids.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_demographic_tree_wire_format() {
        let tree: DemographicFilterObject = FilterNode::and(vec![
            DemographicObject::Gender(OneOf::new(vec![Gender::Female])).into(),
            FilterNode::not(vec![DemographicObject::Age(RangeBound::Lt(DemographicAge::Age20)).into()]),
        ]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "operator",
                "and": [
                    {"type": "gender", "oneOf": ["female"]},
                    {"type": "operator", "not": [{"type": "age", "lt": "age_20"}]}
                ]
            })
        );
        let parsed: DemographicFilterObject = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_recipient_leaf_parses_as_leaf() {
        let node: RecipientObject =
            serde_json::from_str(r#"{"type":"audience","audienceGroupId":5614991017776}"#).unwrap();
        assert_eq!(node, FilterNode::Leaf(AudienceObject::new(5614991017776)));
    }

    #[test]
    fn test_subscription_period_and_app_type_tags() {
        let node: DemographicObject =
            serde_json::from_str(r#"{"type":"subscriptionPeriod","gte":"day_90"}"#).unwrap();
        assert_eq!(
            node,
            DemographicObject::SubscriptionPeriod(RangeBound::Gte(SubscriptionPeriod::Day90))
        );
        let node: DemographicObject =
            serde_json::from_str(r#"{"type":"appType","oneOf":["ios"]}"#).unwrap();
        assert_eq!(node.kind(), "appType");
    }

    #[test]
    fn test_operator_with_two_lists_is_rejected() {
        let raw = r#"{"type":"operator","and":[{"type":"audience","audienceGroupId":1}],"or":[]}"#;
        assert!(serde_json::from_str::<RecipientObject>(raw).is_err());
        assert!(serde_json::from_str::<FilterOperator<AudienceObject>>(raw).is_err());

        let raw = r#"{"type":"operator","or":[{"type":"gender","oneOf":["male"]}],"not":[]}"#;
        assert!(serde_json::from_str::<DemographicFilterObject>(raw).is_err());
    }

    #[test]
    fn test_operator_without_list_is_rejected() {
        let err = serde_json::from_str::<FilterOperator<AudienceObject>>(r#"{"type":"operator"}"#).unwrap_err();
        assert!(err.to_string().contains("needs one of"));
    }

    #[test]
    fn test_single_list_operator_parses() {
        let raw = r#"{"type":"operator","not":[{"type":"audience","audienceGroupId":7}]}"#;
        let node: RecipientObject = serde_json::from_str(raw).unwrap();
        assert_eq!(node, FilterNode::not(vec![AudienceObject::new(7).into()]));
    }

    #[test]
    fn test_leaves_are_collected_depth_first() {
        let tree: RecipientObject = FilterNode::or(vec![
            AudienceObject::new(1).into(),
            FilterNode::and(vec![AudienceObject::new(2).into(), AudienceObject::new(3).into()]),
        ]);
        let ids: Vec<i64> = tree.leaves().iter().map(|a| a.audience_group_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
