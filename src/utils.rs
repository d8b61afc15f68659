//! Utility functions for dates, string cleanup and file system checks.
//!
//! - Date parsing and inclusive date ranges for the `--from`/`--to` options
//! - The default "previous working day(s)" window of the daily run
//! - Tag stripping and number extraction for scraped HTML fragments
//! - String truncation for log output
//! - Output path validation

use crate::error::ToolError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid date regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.+?>").expect("valid tag regex"));
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits regex"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));

/// Parse `YYYY-M-D`; month and day may be zero padded or not.
pub fn parse_date(s: &str) -> Result<NaiveDate, ToolError> {
    let s = s.trim();
    let caps = DATE_RE
        .captures(s)
        .ok_or_else(|| ToolError::InvalidDate(s.to_string()))?;
    let field = |i: usize| caps[i].parse::<u32>().ok();
    let (Some(y), Some(m), Some(d)) = (field(1), field(2), field(3)) else {
        return Err(ToolError::InvalidDate(s.to_string()));
    };
    NaiveDate::from_ymd_opt(y as i32, m, d).ok_or_else(|| ToolError::InvalidDate(s.to_string()))
}

/// Parse a `--from`/`--to` pair, rejecting an end before the start.
pub fn parse_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), ToolError> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    if end < start {
        return Err(ToolError::DateOrder {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((start, end))
}

/// Every day from `start` to `end`, both included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Window covered by the daily run: yesterday, or Friday to Sunday when
/// run on a Monday.
pub fn default_daily_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today - Duration::days(1);
    if today.weekday() == Weekday::Mon {
        (today - Duration::days(3), end)
    } else {
        (end, end)
    }
}

/// `2017-05-06` → `2017-5-6`, the form the site uses in archive URLs.
pub fn unpadded_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Remove anything that looks like a markup tag.
pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// First run of digits in `s`, if any.
pub fn first_number(s: &str) -> Option<u64> {
    DIGITS_RE.find(s).and_then(|m| m.as_str().parse().ok())
}

/// Collapse every whitespace run to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    SPACE_RE.replace_all(s, " ").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a character
/// boundary) with an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory an output file goes to exists.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
            debug!(parent = %parent.display(), "Output directory ready");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date_padded_and_unpadded() {
        assert_eq!(parse_date("2017-05-06").unwrap(), d(2017, 5, 6));
        assert_eq!(parse_date("2017-5-6").unwrap(), d(2017, 5, 6));
        assert_eq!(parse_date(" 2017-12-31 ").unwrap(), d(2017, 12, 31));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("6.5.2017").is_err());
        assert!(parse_date("2017-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_range_order() {
        assert!(parse_range("2017-5-6", "2017-5-6").is_ok());
        let err = parse_range("2017-5-7", "2017-5-6").unwrap_err();
        assert!(matches!(err, ToolError::DateOrder { .. }));
    }

    #[test]
    fn test_date_range_inclusive() {
        let days: Vec<_> = date_range(d(2017, 2, 27), d(2017, 3, 1)).collect();
        assert_eq!(days, vec![d(2017, 2, 27), d(2017, 2, 28), d(2017, 3, 1)]);
        assert_eq!(date_range(d(2017, 3, 1), d(2017, 3, 1)).count(), 1);
    }

    #[test]
    fn test_default_daily_range() {
        // 2017-05-10 is a Wednesday
        assert_eq!(default_daily_range(d(2017, 5, 10)), (d(2017, 5, 9), d(2017, 5, 9)));
        // 2017-05-08 is a Monday
        assert_eq!(default_daily_range(d(2017, 5, 8)), (d(2017, 5, 5), d(2017, 5, 7)));
    }

    #[test]
    fn test_unpadded_date() {
        assert_eq!(unpadded_date(d(2017, 5, 6)), "2017-5-6");
        assert_eq!(unpadded_date(d(2017, 10, 20)), "2017-10-20");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("Ogledov: 1234"), Some(1234));
        assert_eq!(first_number("none"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\n b\tc"), "a b c");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let s = "ščž".repeat(10);
        let result = truncate_for_log(&s, 3);
        assert!(result.starts_with('š'));
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a/b/out.csv");
        ensure_parent_dir(&target).await.unwrap();
        assert!(tmp.path().join("a/b").is_dir());
    }
}
