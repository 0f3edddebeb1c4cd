use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// Category label that matches every article.
pub const ALL_CATEGORIES: &str = "all";

// ============================================================================
// Data Structures
// ============================================================================

/// One article as delivered by the feed.
///
/// Articles are read-only once decoded. `date` is kept as the source text and
/// parsed on demand by [`Article::published_at`], so an odd date never rejects
/// the whole feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    pub date: String,
    pub category: String,
    pub views: u64,
    pub word_count: u64,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl Article {
    /// Parse `date` into a UTC timestamp.
    ///
    /// Accepts RFC 3339, RFC 2822, bare dates (`2024-01-01`) and naive
    /// date-times with either a `T` or a space separator. Naive values are
    /// read as UTC. Returns `None` for anything else.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }
}

/// Naive date-time layouts tried after RFC 3339 and RFC 2822.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_bare_date_is_utc_midnight() {
        assert_eq!(
            parse_date("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_date("2024-06-01T12:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            parse_date("Sat, 01 Jun 2024 08:30:00 +0000"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_naive_datetime_variants() {
        let expected = Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 15, 16).unwrap());
        assert_eq!(parse_date("2024-03-05T14:15:16"), expected);
        assert_eq!(parse_date("2024-03-05 14:15:16"), expected);
        assert_eq!(
            parse_date("2024-03-05 14:15"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn test_published_at_trims_whitespace() {
        let article = Article {
            title: "T".into(),
            content: String::new(),
            image: None,
            date: "  2024-01-01  ".into(),
            category: "tech".into(),
            views: 0,
            word_count: 0,
            additional_info: None,
        };
        assert!(article.published_at().is_some());
    }
}
