use ::serde::Serializer;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Which end of an inclusive range a parsed bound is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEdge {
    Start,
    End,
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a user-supplied date filter.
///
/// Accepts RFC 3339, naive ISO date-times (read as UTC) and bare `YYYY-MM-DD` dates.
/// A bare date covers the whole day: midnight for [`RangeEdge::Start`], the last
/// nanosecond of the day for [`RangeEdge::End`]. Returns `None` when nothing matches.
pub fn parse_range_bound(raw: &str, edge: RangeEdge) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let naive = match edge {
        RangeEdge::Start => date.and_hms_opt(0, 0, 0)?,
        RangeEdge::End => date.and_hms_nano_opt(23, 59, 59, 999_999_999)?,
    };
    Some(naive.and_utc())
}
