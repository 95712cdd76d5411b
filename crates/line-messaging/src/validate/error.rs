//! Validation findings: paths, constraint descriptors and error kinds.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field (JSON property name).
    Field(&'static str),
    /// A position inside an array.
    Index(usize),
}

/// Location of a node inside a payload tree, e.g. `contents.body.contents[2].action`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The kind of problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// A scalar field fails a length, range, enum, format or URL-scheme check.
    FieldConstraintViolation,
    /// Two fields that must not co-occur are both set.
    MutualExclusionViolation,
    /// A collection has too many (or too few) items.
    StructuralBoundViolation,
    /// A constraint across siblings fails (e.g. carousel bubble sizes differ).
    CrossChildInvariantViolation,
    /// A logical operator was given zero children.
    EmptyOperatorList,
    /// Nesting went past the configured guard depth.
    DepthExceeded,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::FieldConstraintViolation => "FieldConstraintViolation",
            ErrorCode::MutualExclusionViolation => "MutualExclusionViolation",
            ErrorCode::StructuralBoundViolation => "StructuralBoundViolation",
            ErrorCode::CrossChildInvariantViolation => "CrossChildInvariantViolation",
            ErrorCode::EmptyOperatorList => "EmptyOperatorList",
            ErrorCode::DepthExceeded => "DepthExceeded",
        };
        f.write_str(name)
    }
}

/// The rule that was broken, rendered compactly (`maxLength:300`, `max:10`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    MaxLength(usize),
    /// Inclusive numeric range.
    Range { min: i64, max: i64 },
    /// Inclusive numeric lower bound.
    AtLeast(i64),
    OneOf {
        name: &'static str,
        allowed: &'static [&'static str],
    },
    UrlScheme(&'static [&'static str]),
    Format(&'static str),
    /// Field must be set in this context.
    Required,
    /// At least one of the two fields must be populated.
    RequiredOneOf(&'static str, &'static str),
    /// The two fields must not both be set.
    Exclusive(&'static str, &'static str),
    /// This field must be strictly less than the named sibling.
    LessThan(&'static str),
    MaxItems(usize),
    MinItems(usize),
    ExactItems(usize),
    /// All siblings must agree on the named property.
    SameValue(&'static str),
    NonEmpty,
    MaxDepth(usize),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MaxLength(n) => write!(f, "maxLength:{n}"),
            Constraint::Range { min, max } => write!(f, "range:{min}..={max}"),
            Constraint::AtLeast(n) => write!(f, "gte:{n}"),
            Constraint::OneOf { name, .. } => write!(f, "oneOf:{name}"),
            Constraint::UrlScheme(schemes) => write!(f, "urlScheme:{}", schemes.join("|")),
            Constraint::Format(desc) => write!(f, "format:{desc}"),
            Constraint::Required => write!(f, "required"),
            Constraint::RequiredOneOf(a, b) => write!(f, "requiredOneOf:{a}|{b}"),
            Constraint::Exclusive(a, b) => write!(f, "exclusive:{a}|{b}"),
            Constraint::LessThan(other) => write!(f, "lt:{other}"),
            Constraint::MaxItems(n) => write!(f, "max:{n}"),
            Constraint::MinItems(n) => write!(f, "min:{n}"),
            Constraint::ExactItems(n) => write!(f, "exactly:{n}"),
            Constraint::SameValue(property) => write!(f, "same:{property}"),
            Constraint::NonEmpty => write!(f, "nonEmpty"),
            Constraint::MaxDepth(n) => write!(f, "maxDepth:{n}"),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single problem, attributed to the node where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    pub code: ErrorCode,
    pub constraint: Constraint,
    /// Rendering of the offending value, when there is a scalar to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub detail: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}] {}", self.path, self.code, self.constraint, self.detail)
    }
}

/// Every problem found in one validation pass, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("payload failed validation with {} error(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Errors of one kind, in order.
    pub fn with_code(&self, code: ErrorCode) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.code == code)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
