//! Primitive field validators.
//!
//! Pure checks over a single scalar. Each returns `Ok(())` or a
//! [`Violation`]; the [`Validator`](super::Validator) attaches the path.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use url::Url;

use super::error::Constraint;

/// Schemes accepted for action URIs.
pub const ACTION_SCHEMES: &[&str] = &["http", "https", "line", "tel"];

/// Schemes accepted for image, video and audio assets.
pub const ASSET_SCHEMES: &[&str] = &["https"];

/// A failed primitive check, not yet attributed to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub constraint: Constraint,
    pub actual: String,
    pub detail: String,
}

impl Violation {
    fn new(constraint: Constraint, actual: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            constraint,
            actual: actual.into(),
            detail: detail.into(),
        }
    }
}

pub type Check = Result<(), Violation>;

/// Character count, not byte length.
pub fn max_length(value: &str, max: usize) -> Check {
    let count = value.chars().count();
    if count <= max {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::MaxLength(max),
        format!("{count} characters"),
        format!("must be at most {max} characters, got {count}"),
    ))
}

pub fn range(value: i64, min: i64, max: i64) -> Check {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::Range { min, max },
        value.to_string(),
        format!("must be between {min} and {max}"),
    ))
}

/// Range check for coordinates, where the bounds are whole degrees.
pub fn range_f64(value: f64, min: i64, max: i64) -> Check {
    if value.is_finite() && value >= min as f64 && value <= max as f64 {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::Range { min, max },
        value.to_string(),
        format!("must be between {min} and {max}"),
    ))
}

pub fn at_least(value: i64, min: i64) -> Check {
    if value >= min {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::AtLeast(min),
        value.to_string(),
        format!("must be {min} or higher"),
    ))
}

pub fn one_of(value: &str, name: &'static str, allowed: &'static [&'static str]) -> Check {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::OneOf { name, allowed },
        value,
        format!("`{value}` is not a valid {name}"),
    ))
}

/// The value must parse as an absolute URL whose scheme is listed.
pub fn url_scheme(value: &str, allowed: &'static [&'static str]) -> Check {
    let scheme_ok = match Url::parse(value) {
        Ok(url) => allowed.contains(&url.scheme()),
        Err(_) => false,
    };
    if scheme_ok {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::UrlScheme(allowed),
        value,
        format!("must be an absolute URL using {}", allowed.join(", ")),
    ))
}

/// `#RRGGBB`, or `#RRGGBBAA` when `allow_alpha` is set.
pub fn hex_color(value: &str, allow_alpha: bool) -> Check {
    let digits = value.strip_prefix('#').unwrap_or("");
    let len_ok = digits.len() == 6 || (allow_alpha && digits.len() == 8);
    if len_ok && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(());
    }
    let format = if allow_alpha { "#RRGGBB[AA]" } else { "#RRGGBB" };
    Err(Violation::new(
        Constraint::Format(format),
        value,
        format!("must be a hexadecimal color code ({format})"),
    ))
}

/// Flex `aspectRatio`: `{width}:{height}`, both 1..=100000, height at most 3× width.
pub fn aspect_ratio(value: &str) -> Check {
    let parsed = value.split_once(':').and_then(|(w, h)| {
        let w: u32 = w.parse().ok()?;
        let h: u32 = h.parse().ok()?;
        Some((w, h))
    });
    match parsed {
        Some((w, h))
            if (1..=100_000).contains(&w) && (1..=100_000).contains(&h) && h <= w * 3 =>
        {
            Ok(())
        }
        _ => Err(Violation::new(
            Constraint::Format("{width}:{height}"),
            value,
            "must be {width}:{height} with values 1..=100000 and height at most 3x width",
        )),
    }
}

/// Flex size: one of `keywords`, or a pixel value such as `16px` / `12.5px`.
pub fn flex_size(value: &str, keywords: &'static [&'static str]) -> Check {
    let pixels_ok = value
        .strip_suffix("px")
        .map(|n| !n.is_empty() && n.parse::<f64>().is_ok_and(|px| px >= 0.0))
        .unwrap_or(false);
    if pixels_ok || keywords.contains(&value) {
        return Ok(());
    }
    Err(Violation::new(
        Constraint::Format("keyword|{n}px"),
        value,
        format!("must be one of {} or a pixel value", keywords.join(", ")),
    ))
}

/// Which value shape a datetime picker expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatetimeShape {
    Date,
    Time,
    Datetime,
}

impl DatetimeShape {
    fn format(self) -> &'static str {
        match self {
            DatetimeShape::Date => "YYYY-MM-DD",
            DatetimeShape::Time => "HH:mm",
            DatetimeShape::Datetime => "YYYY-MM-DDTHH:mm",
        }
    }
}

/// Parse a datetime picker value into a comparable timestamp.
///
/// Dates must fall between 1900-01-01 and 2100-12-31. Datetimes accept a
/// lower-case `t` separator as well.
pub fn parse_datetime(value: &str, shape: DatetimeShape) -> Result<NaiveDateTime, Violation> {
    let parsed = match shape {
        DatetimeShape::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        DatetimeShape::Time => NaiveTime::parse_from_str(value, "%H:%M")
            .ok()
            .and_then(|t| NaiveDate::from_ymd_opt(1900, 1, 1).map(|d| d.and_time(t))),
        DatetimeShape::Datetime => {
            NaiveDateTime::parse_from_str(&value.replacen('t', "T", 1), "%Y-%m-%dT%H:%M").ok()
        }
    };
    let lower = NaiveDate::from_ymd_opt(1900, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let upper = NaiveDate::from_ymd_opt(2100, 12, 31).and_then(|d| d.and_hms_opt(23, 59, 0));
    match (parsed, lower, upper) {
        (Some(ts), Some(lo), Some(hi)) if ts >= lo && ts <= hi => Ok(ts),
        _ => Err(Violation::new(
            Constraint::Format(shape.format()),
            value,
            format!(
                "must be {} between 1900-01-01 and 2100-12-31",
                shape.format()
            ),
        )),
    }
}

pub fn datetime(value: &str, shape: DatetimeShape) -> Check {
    parse_datetime(value, shape).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_length_counts_characters() {
        assert!(max_length("こんにちは", 5).is_ok());
        let err = max_length("こんにちは!", 5).unwrap_err();
        assert_eq!(err.constraint, Constraint::MaxLength(5));
        assert_eq!(err.actual, "6 characters");
    }

    #[test]
    fn test_url_scheme() {
        assert!(url_scheme("https://example.com/a.png", ASSET_SCHEMES).is_ok());
        assert!(url_scheme("http://example.com/a.png", ASSET_SCHEMES).is_err());
        assert!(url_scheme("tel:0312345678", ACTION_SCHEMES).is_ok());
        assert!(url_scheme("line://nv/location", ACTION_SCHEMES).is_ok());
        assert!(url_scheme("ftp://example.com", ACTION_SCHEMES).is_err());
        assert!(url_scheme("not a url", ACTION_SCHEMES).is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(hex_color("#00ff00", false).is_ok());
        assert!(hex_color("#00FF00", false).is_ok());
        assert!(hex_color("#00ff0080", false).is_err());
        assert!(hex_color("#00ff0080", true).is_ok());
        assert!(hex_color("00ff00", true).is_err());
        assert!(hex_color("#zzzzzz", false).is_err());
    }

    #[test]
    fn test_aspect_ratio() {
        assert!(aspect_ratio("20:13").is_ok());
        assert!(aspect_ratio("1:3").is_ok());
        assert!(aspect_ratio("1:4").is_err());
        assert!(aspect_ratio("0:1").is_err());
        assert!(aspect_ratio("wide").is_err());
    }

    #[test]
    fn test_datetime_shapes() {
        assert!(datetime("2017-12-25", DatetimeShape::Date).is_ok());
        assert!(datetime("23:59", DatetimeShape::Time).is_ok());
        assert!(datetime("2017-12-25T01:30", DatetimeShape::Datetime).is_ok());
        assert!(datetime("2017-12-25t01:30", DatetimeShape::Datetime).is_ok());
        assert!(datetime("1899-12-31", DatetimeShape::Date).is_err());
        assert!(datetime("24:00", DatetimeShape::Time).is_err());
        assert!(datetime("2017-12-25", DatetimeShape::Time).is_err());
    }

    #[test]
    fn test_ranges() {
        assert!(at_least(0, 0).is_ok());
        assert_eq!(at_least(-1, 0).unwrap_err().constraint, Constraint::AtLeast(0));
        assert!(range_f64(35.65, -90, 90).is_ok());
        assert!(range_f64(95.0, -90, 90).is_err());
        assert!(range_f64(f64::NAN, -90, 90).is_err());
    }
}
