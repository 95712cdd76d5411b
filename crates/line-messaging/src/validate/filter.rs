//! AND/OR/NOT operator trees over leaf predicates.

use crate::filter::{
    AudienceMembership, AudienceObject, DemographicObject, DemographicProfile, FilterNode, LogicalOp, RangeBound,
    AREA_CODES,
};

use super::primitive;
use super::{limits, Constraint, ErrorCode, Normalize, Validate, Validator};

/// A leaf type that may appear in a [`FilterNode`] tree.
pub trait FilterLeaf: Validate {
    /// Most leaves a whole tree may hold, if limited.
    const MAX_LEAVES: Option<usize> = None;
}

impl FilterLeaf for AudienceObject {
    const MAX_LEAVES: Option<usize> = Some(limits::RECIPIENT_AUDIENCES);
}

impl FilterLeaf for DemographicObject {}

impl<T: FilterLeaf> Validate for FilterNode<T> {
    fn validate_with(&self, v: &mut Validator) {
        if let Some(max) = T::MAX_LEAVES {
            let count = self.leaves().len();
            if count > max {
                v.report(
                    ErrorCode::StructuralBoundViolation,
                    Constraint::MaxItems(max),
                    Some(count.to_string()),
                    format!("may combine at most {max} objects, got {count}"),
                );
            }
        }
        walk(self, v);
    }
}

impl<T> Normalize for FilterNode<T> {}

fn walk<T: Validate>(node: &FilterNode<T>, v: &mut Validator) {
    match node {
        FilterNode::Leaf(leaf) => leaf.validate_with(v),
        FilterNode::Operator(op) => v.nested(|v| {
            let name = op.op.name();
            let children = op.op.children();
            if children.is_empty() {
                v.field(name, |v| {
                    v.report(
                        ErrorCode::EmptyOperatorList,
                        Constraint::NonEmpty,
                        None,
                        format!("`{name}` needs at least one operand"),
                    )
                });
            }
            v.each(name, children, |child, v| walk(child, v));
        }),
    }
}

impl Validate for AudienceObject {
    fn validate_with(&self, v: &mut Validator) {
        v.check("audienceGroupId", primitive::at_least(self.audience_group_id, 1));
    }
}

fn non_empty_list(v: &mut Validator, len: usize) {
    if len == 0 {
        v.field("oneOf", |v| {
            v.report(
                ErrorCode::FieldConstraintViolation,
                Constraint::NonEmpty,
                None,
                "`oneOf` must list at least one value",
            )
        });
    }
}

impl Validate for DemographicObject {
    fn validate_with(&self, v: &mut Validator) {
        match self {
            DemographicObject::Gender(g) => non_empty_list(v, g.one_of.len()),
            DemographicObject::AppType(a) => non_empty_list(v, a.one_of.len()),
            DemographicObject::Area(a) => {
                non_empty_list(v, a.one_of.len());
                v.each("oneOf", &a.one_of, |code, v| {
                    v.check_here(primitive::one_of(code, "area code", AREA_CODES))
                });
            }
            DemographicObject::Age(_) | DemographicObject::SubscriptionPeriod(_) => {}
        }
    }
}

// ── Local evaluation ─────────────────────────────────────────

/// A condition that can be checked against a record of type `R`.
pub trait Predicate<R> {
    fn matches(&self, record: &R) -> bool;

    /// The records that satisfy this condition, in order.
    fn select<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// `and` = all, `or` = any, `not` = none of the children.
impl<T: Predicate<R>, R> Predicate<R> for FilterNode<T> {
    fn matches(&self, record: &R) -> bool {
        match self {
            FilterNode::Leaf(leaf) => leaf.matches(record),
            FilterNode::Operator(op) => match &op.op {
                LogicalOp::And(children) => children.iter().all(|c| c.matches(record)),
                LogicalOp::Or(children) => children.iter().any(|c| c.matches(record)),
                LogicalOp::Not(children) => !children.iter().any(|c| c.matches(record)),
            },
        }
    }
}

fn bound_matches(value: Option<u32>, bound: RangeBound<u32>) -> bool {
    match (value, bound) {
        (Some(value), RangeBound::Gte(min)) => value >= min,
        (Some(value), RangeBound::Lt(max)) => value < max,
        (None, _) => false,
    }
}

impl Predicate<DemographicProfile> for DemographicObject {
    fn matches(&self, profile: &DemographicProfile) -> bool {
        match self {
            DemographicObject::Gender(g) => profile.gender.is_some_and(|gender| g.one_of.contains(&gender)),
            DemographicObject::AppType(a) => profile.app_type.is_some_and(|app| a.one_of.contains(&app)),
            DemographicObject::Area(a) => profile.area.as_ref().is_some_and(|area| a.one_of.contains(area)),
            DemographicObject::Age(bound) => {
                let bound = match bound {
                    RangeBound::Gte(age) => RangeBound::Gte(age.years()),
                    RangeBound::Lt(age) => RangeBound::Lt(age.years()),
                };
                bound_matches(profile.age, bound)
            }
            DemographicObject::SubscriptionPeriod(bound) => {
                let bound = match bound {
                    RangeBound::Gte(period) => RangeBound::Gte(period.days()),
                    RangeBound::Lt(period) => RangeBound::Lt(period.days()),
                };
                bound_matches(profile.subscription_days, bound)
            }
        }
    }
}

impl Predicate<AudienceMembership> for AudienceObject {
    fn matches(&self, membership: &AudienceMembership) -> bool {
        membership.audience_group_ids.contains(&self.audience_group_id)
    }
}
