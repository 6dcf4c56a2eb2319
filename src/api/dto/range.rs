//! Range query parameter and `Content-Range` metadata for link listings.
//!
//! Clients select an inclusive slice with `?range=[start,end]`. The response
//! always carries `Content-Range: links {start}-{end}/{total}`.

use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::sync::LazyLock;

use crate::error::AppError;

/// Matches `[start,end]` at the start of the value; trailing text is ignored.
///
/// Digits are ASCII only, the same set `i64::from_str` accepts.
static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([0-9]+),\s*([0-9]+)\]").unwrap());

pub const INVALID_RANGE_FORMAT: &str = "Invalid range format. Expected format: [start, end]";
pub const INVALID_RANGE_BOUNDS: &str =
    "Invalid range: start must be >= 0 and end must be >= start";

/// Query parameters for `GET /api/links`.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksParams {
    pub range: Option<String>,
}

/// Inclusive index range over the link listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRange {
    pub start: i64,
    pub end: i64,
}

impl LinkRange {
    /// Parses a `[start,end]` descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the value does not match the
    /// pattern (including negative numbers and values beyond `i64`), or if
    /// `end < start`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let format_error = || AppError::bad_request(INVALID_RANGE_FORMAT, json!({ "range": raw }));

        let captures = RANGE_REGEX.captures(raw).ok_or_else(format_error)?;
        let start: i64 = captures[1].parse().map_err(|_| format_error())?;
        let end: i64 = captures[2].parse().map_err(|_| format_error())?;

        if start < 0 || end < start {
            return Err(AppError::bad_request(
                INVALID_RANGE_BOUNDS,
                json!({ "start": start, "end": end }),
            ));
        }

        Ok(Self { start, end })
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        self.start
    }

    /// Rows to return: `end - start + 1`.
    pub fn limit(&self) -> i64 {
        (self.end - self.start).saturating_add(1)
    }
}

/// Value of the `Content-Range` response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub start: i64,
    pub end: i64,
    pub total: i64,
}

impl ContentRange {
    /// Metadata for an unranged listing: `0-{returned - 1}`.
    ///
    /// An empty table yields `links 0--1/0`; consumers may rely on that form.
    pub fn unranged(returned: usize, total: i64) -> Self {
        Self {
            start: 0,
            end: returned as i64 - 1,
            total,
        }
    }

    /// Metadata for a ranged listing.
    ///
    /// The end reflects what was actually returned. An empty slice reports
    /// `max(0, start - 1)`.
    pub fn ranged(range: LinkRange, returned: usize, total: i64) -> Self {
        let end = if returned > 0 {
            range.start + returned as i64 - 1
        } else {
            (range.start - 1).max(0)
        };

        Self {
            start: range.start,
            end,
            total,
        }
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "links {}-{}/{}", self.start, self.end, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        err.to_string()
    }

    #[test]
    fn test_parse_valid_ranges() {
        assert_eq!(
            LinkRange::parse("[0,9]").unwrap(),
            LinkRange { start: 0, end: 9 }
        );
        assert_eq!(
            LinkRange::parse("[5,  10]").unwrap(),
            LinkRange { start: 5, end: 10 }
        );
        assert_eq!(
            LinkRange::parse("[3,3]").unwrap(),
            LinkRange { start: 3, end: 3 }
        );
    }

    #[test]
    fn test_parse_tolerates_trailing_text() {
        assert_eq!(
            LinkRange::parse("[1,2]extra").unwrap(),
            LinkRange { start: 1, end: 2 }
        );
    }

    #[test]
    fn test_parse_format_errors() {
        for raw in [
            "invalid", "", "[1,]", "[a,b]", "1,2", " [1,2]", "[1 ,2]", "[-1,10]", "[١,٢]",
        ] {
            let err = LinkRange::parse(raw).unwrap_err();
            assert_eq!(message(err), INVALID_RANGE_FORMAT, "input: {raw:?}");
        }
    }

    #[test]
    fn test_parse_overflow_is_format_error() {
        let err = LinkRange::parse("[0,99999999999999999999]").unwrap_err();
        assert_eq!(message(err), INVALID_RANGE_FORMAT);
    }

    #[test]
    fn test_parse_end_before_start() {
        let err = LinkRange::parse("[10,5]").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(message(err), INVALID_RANGE_BOUNDS);
    }

    #[test]
    fn test_offset_and_limit() {
        let range = LinkRange { start: 5, end: 10 };
        assert_eq!(range.offset(), 5);
        assert_eq!(range.limit(), 6);

        let huge = LinkRange {
            start: 0,
            end: i64::MAX,
        };
        assert_eq!(huge.limit(), i64::MAX);
    }

    #[test]
    fn test_content_range_unranged() {
        assert_eq!(ContentRange::unranged(5, 5).to_string(), "links 0-4/5");
        assert_eq!(ContentRange::unranged(0, 0).to_string(), "links 0--1/0");
    }

    #[test]
    fn test_content_range_ranged() {
        let range = LinkRange { start: 0, end: 9 };
        assert_eq!(
            ContentRange::ranged(range, 3, 3).to_string(),
            "links 0-2/3"
        );

        let range = LinkRange { start: 10, end: 15 };
        assert_eq!(
            ContentRange::ranged(range, 0, 5).to_string(),
            "links 10-9/5"
        );

        let range = LinkRange { start: 0, end: 4 };
        assert_eq!(
            ContentRange::ranged(range, 0, 0).to_string(),
            "links 0-0/0"
        );
    }
}
