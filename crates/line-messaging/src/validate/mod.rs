//! Local validation and normalization of outbound payloads.
//!
//! Message trees (flex boxes inside boxes, carousels of bubbles, template
//! columns, imagemap actions) and narrowcast filter trees are checked
//! against the documented limits of the Messaging API before they are sent.
//!
//! A single pass collects every problem as a [`FieldError`] carrying the
//! path of the offending node:
//!
//! ```rust
//! use line_messaging::action::PostbackAction;
//! use line_messaging::validate::Validate;
//!
//! let action = PostbackAction::new("x".repeat(301));
//! let errors = action.validate().unwrap_err();
//! assert_eq!(errors.errors[0].path.to_string(), "data");
//! assert_eq!(errors.errors[0].constraint.to_string(), "maxLength:300");
//! ```
//!
//! Layers, leaf to root:
//! - [`primitive`]: pure scalar checks (length, range, enum, URL scheme, formats)
//! - `nodes`: one tagged variant at a time (actions, leaf messages, flex leaves)
//! - `walker`: recursive containers, structural bounds, cross-child invariants
//! - `filter`: AND/OR/NOT operator trees

pub mod error;
mod filter;
mod nodes;
pub mod primitive;
mod walker;

pub use error::{Constraint, ErrorCode, FieldError, FieldPath, PathSegment, ValidationErrors};
pub use filter::{FilterLeaf, Predicate};
pub use nodes::ActionContext;

use primitive::Violation;

/// Nesting guard applied when no explicit depth is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Documented collection limits.
pub mod limits {
    pub const MESSAGES_PER_REQUEST: usize = 5;
    pub const MULTICAST_RECIPIENTS: usize = 500;
    pub const QUICK_REPLY_ITEMS: usize = 13;
    pub const IMAGEMAP_ACTIONS: usize = 50;
    pub const BUTTONS_ACTIONS: usize = 4;
    pub const CONFIRM_ACTIONS: usize = 2;
    pub const CAROUSEL_COLUMN_ACTIONS: usize = 3;
    pub const CAROUSEL_COLUMNS: usize = 10;
    pub const FLEX_CAROUSEL_BUBBLES: usize = 10;
    pub const RICH_MENU_AREAS: usize = 20;
    pub const RECIPIENT_AUDIENCES: usize = 10;
    pub const UPLOAD_AUDIENCES: usize = 10_000;
}

/// A node that can report its own problems into a [`Validator`].
pub trait Validate {
    /// Append this node's errors, relative to the validator's current path.
    fn validate_with(&self, v: &mut Validator);

    /// Validate with the default depth guard, without normalizing.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        self.validate_with(&mut v);
        v.finish()
    }
}

/// Rewrites a node into its canonical wire form.
///
/// Normalizing is idempotent: normalizing twice equals normalizing once.
pub trait Normalize: Sized {
    fn normalize(self) -> Self {
        self
    }
}

/// Validate `node` and return its normalized form, or every error found.
pub fn validated<T: Validate + Normalize>(node: T) -> Result<T, ValidationErrors> {
    validated_with(node, DEFAULT_MAX_DEPTH)
}

/// [`validated`] with an explicit nesting guard.
///
/// Validation runs first so normalization never recurses past the guard.
pub fn validated_with<T: Validate + Normalize>(
    node: T,
    max_depth: usize,
) -> Result<T, ValidationErrors> {
    let mut v = Validator::with_max_depth(max_depth);
    node.validate_with(&mut v);
    v.finish()?;
    Ok(node.normalize())
}

/// Traversal state: current path, nesting depth and collected errors.
#[derive(Debug)]
pub struct Validator {
    path: Vec<PathSegment>,
    depth: usize,
    max_depth: usize,
    errors: Vec<FieldError>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            path: Vec::new(),
            depth: 0,
            max_depth,
            errors: Vec::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }

    pub fn current_path(&self) -> FieldPath {
        FieldPath::new(self.path.clone())
    }

    // ── Path bookkeeping ─────────────────────────────────────

    /// Run `f` with `name` appended to the path.
    pub fn field(&mut self, name: &'static str, f: impl FnOnce(&mut Self)) {
        self.path.push(PathSegment::Field(name));
        f(self);
        self.path.pop();
    }

    /// Run `f` with `[index]` appended to the path.
    pub fn item(&mut self, index: usize, f: impl FnOnce(&mut Self)) {
        self.path.push(PathSegment::Index(index));
        f(self);
        self.path.pop();
    }

    /// Validate every element of `items` under `name[i]`.
    pub fn each<T>(&mut self, name: &'static str, items: &[T], mut f: impl FnMut(&T, &mut Self)) {
        self.field(name, |v| {
            for (i, item) in items.iter().enumerate() {
                v.item(i, |v| f(item, v));
            }
        });
    }

    /// Enter one level of recursive nesting.
    ///
    /// Past the guard this reports `DepthExceeded` at the current path and
    /// does not call `f`.
    pub fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        if self.depth >= self.max_depth {
            tracing::trace!(depth = self.depth, path = %self.current_path(), "depth guard tripped");
            let max = self.max_depth;
            self.report(
                ErrorCode::DepthExceeded,
                Constraint::MaxDepth(max),
                None,
                format!("nesting exceeds the maximum depth of {max}"),
            );
            return;
        }
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    // ── Reporting ────────────────────────────────────────────

    pub fn report(
        &mut self,
        code: ErrorCode,
        constraint: Constraint,
        actual: Option<String>,
        detail: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            path: self.current_path(),
            code,
            constraint,
            actual,
            detail: detail.into(),
        });
    }

    /// Record a primitive check's outcome at `name`.
    pub fn check(&mut self, name: &'static str, result: Result<(), Violation>) {
        if let Err(violation) = result {
            self.field(name, |v| v.violation(violation));
        }
    }

    /// Record a primitive check's outcome at the current path.
    pub fn check_here(&mut self, result: Result<(), Violation>) {
        if let Err(violation) = result {
            self.violation(violation);
        }
    }

    fn violation(&mut self, violation: Violation) {
        self.report(
            ErrorCode::FieldConstraintViolation,
            violation.constraint,
            Some(violation.actual),
            violation.detail,
        );
    }

    pub fn max_len(&mut self, name: &'static str, value: &str, max: usize) {
        self.check(name, primitive::max_length(value, max));
    }

    pub fn opt_max_len(&mut self, name: &'static str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.max_len(name, value, max);
        }
    }

    /// Length limit plus allowed schemes.
    pub fn url(&mut self, name: &'static str, value: &str, schemes: &'static [&'static str], max: usize) {
        self.max_len(name, value, max);
        self.check(name, primitive::url_scheme(value, schemes));
    }

    pub fn opt_url(
        &mut self,
        name: &'static str,
        value: Option<&str>,
        schemes: &'static [&'static str],
        max: usize,
    ) {
        if let Some(value) = value {
            self.url(name, value, schemes, max);
        }
    }

    pub fn opt_color(&mut self, name: &'static str, value: Option<&str>, allow_alpha: bool) {
        if let Some(value) = value {
            self.check(name, primitive::hex_color(value, allow_alpha));
        }
    }

    /// Report a missing context-required field.
    pub fn required(&mut self, name: &'static str, detail: impl Into<String>) {
        let detail = detail.into();
        self.field(name, |v| {
            v.report(ErrorCode::FieldConstraintViolation, Constraint::Required, None, detail)
        });
    }

    /// Report two mutually exclusive fields set together, at the current node.
    pub fn exclusive(&mut self, a: &'static str, b: &'static str) {
        self.report(
            ErrorCode::MutualExclusionViolation,
            Constraint::Exclusive(a, b),
            None,
            format!("`{a}` and `{b}` cannot both be set"),
        );
    }

    /// Check a collection's size at `name`. Returns `true` when within bounds.
    pub fn bounds(&mut self, name: &'static str, len: usize, min: usize, max: usize) -> bool {
        if (min..=max).contains(&len) {
            return true;
        }
        let (constraint, detail) = if min == max {
            (
                Constraint::ExactItems(max),
                format!("must contain exactly {max} item(s), got {len}"),
            )
        } else if len > max {
            (
                Constraint::MaxItems(max),
                format!("must contain at most {max} item(s), got {len}"),
            )
        } else {
            (
                Constraint::MinItems(min),
                format!("must contain at least {min} item(s), got {len}"),
            )
        };
        self.field(name, |v| {
            v.report(
                ErrorCode::StructuralBoundViolation,
                constraint,
                Some(len.to_string()),
                detail,
            )
        });
        false
    }

    /// Report a sibling-level invariant once, at `name`.
    pub fn cross_child(&mut self, name: &'static str, property: &'static str, detail: impl Into<String>) {
        let detail = detail.into();
        self.field(name, |v| {
            v.report(
                ErrorCode::CrossChildInvariantViolation,
                Constraint::SameValue(property),
                None,
                detail,
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_fields_and_items() {
        let mut v = Validator::new();
        v.field("contents", |v| {
            v.item(3, |v| v.max_len("text", "abcdef", 3));
        });
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.errors[0].path.to_string(), "contents[3].text");
    }

    #[test]
    fn test_bounds_reports_exact_counts() {
        let mut v = Validator::new();
        assert!(!v.bounds("actions", 3, 2, 2));
        assert!(v.bounds("columns", 10, 1, 10));
        assert!(!v.bounds("columns", 11, 1, 10));
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.errors[0].constraint, Constraint::ExactItems(2));
        assert_eq!(errors.errors[1].constraint, Constraint::MaxItems(10));
        assert_eq!(errors.errors[1].code, ErrorCode::StructuralBoundViolation);
    }

    #[test]
    fn test_nested_guard_stops_descent() {
        fn dive(v: &mut Validator, remaining: usize) {
            if remaining == 0 {
                return;
            }
            v.nested(|v| v.field("next", |v| dive(v, remaining - 1)));
        }
        let mut v = Validator::with_max_depth(4);
        dive(&mut v, 10);
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].code, ErrorCode::DepthExceeded);
        assert_eq!(errors.errors[0].path.to_string(), "next.next.next.next");
    }
}
