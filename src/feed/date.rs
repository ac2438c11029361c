//! Publication-date parsing for podcast feeds.
//!
//! Feed `pubDate` values are nominally RFC 822, but real-world publishing
//! tools emit legacy named time zones ("PDT", "AEST", ...) and single-digit
//! days. This module normalizes those into `DateTime<Utc>`, falling back to
//! the Unix epoch sentinel when a date cannot be recognized.

use chrono::{DateTime, Utc};

use super::error::DateParseError;

/// RFC-822-style layout with a two-digit day: `Wed, 01 Jan 2020 10:00:00 -0500`.
const FORMAT_TWO_DIGIT_DAY: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Fallback layout with a single-digit day: `Sat, 5 Mar 2022 12:00:00 +0000`.
const FORMAT_ONE_DIGIT_DAY: &str = "%a, %e %b %Y %H:%M:%S %z";

/// Named time-zone abbreviations mapped to their numeric UTC offsets.
///
/// Covers military, US, European, and Asia-Pacific zones seen in feeds
/// produced by legacy publishing tools. Read-only, safe to share.
static ZONE_OFFSETS: &[(&str, &str)] = &[
    ("ACDT", "+1030"),
    ("ACST", "+0930"),
    ("ADT", "-0300"),
    ("AEDT", "+1100"),
    ("AEST", "+1000"),
    ("AHDT", "-0900"),
    ("AHST", "-1000"),
    ("AST", "-0400"),
    ("AT", "-0200"),
    ("AWDT", "+0900"),
    ("AWST", "+0800"),
    ("BAT", "+0300"),
    ("BDST", "+0200"),
    ("BET", "-1100"),
    ("BST", "-0300"),
    ("BT", "+0300"),
    ("BZT2", "-0300"),
    ("CADT", "+1030"),
    ("CAST", "+0930"),
    ("CAT", "-1000"),
    ("CCT", "+0800"),
    ("CDT", "-0500"),
    ("CED", "+0200"),
    ("CET", "+0100"),
    ("CEST", "+0200"),
    ("CST", "-0600"),
    ("EAST", "+1000"),
    ("EDT", "-0400"),
    ("EED", "+0300"),
    ("EET", "+0200"),
    ("EEST", "+0300"),
    ("EST", "-0500"),
    ("FST", "+0200"),
    ("FWT", "+0100"),
    ("GMT", "+0000"),
    ("GST", "+1000"),
    ("HDT", "-0900"),
    ("HST", "-1000"),
    ("IDLE", "+1200"),
    ("IDLW", "-1200"),
    ("IST", "+0530"),
    ("IT", "+0330"),
    ("JST", "+0900"),
    ("JT", "+0700"),
    ("MDT", "-0600"),
    ("MED", "+0200"),
    ("MET", "+0100"),
    ("MEST", "+0200"),
    ("MEWT", "+0100"),
    ("MST", "-0700"),
    ("MT", "+0800"),
    ("NDT", "-0230"),
    ("NFT", "-0330"),
    ("NT", "-1100"),
    ("NST", "+0630"),
    ("NZ", "+1100"),
    ("NZST", "+1200"),
    ("NZDT", "+1300"),
    ("NZT", "+1200"),
    ("PDT", "-0700"),
    ("PST", "-0800"),
    ("ROK", "+0900"),
    ("SAD", "+1000"),
    ("SAST", "+0900"),
    ("SAT", "+0900"),
    ("SDT", "+1000"),
    ("SST", "+0200"),
    ("SWT", "+0100"),
    ("USZ3", "+0400"),
    ("USZ4", "+0500"),
    ("USZ5", "+0600"),
    ("USZ6", "+0700"),
    ("UT", "-0000"),
    ("UTC", "-0000"),
    ("UZ10", "+1100"),
    ("WAT", "-0100"),
    ("WET", "-0000"),
    ("WST", "+0800"),
    ("YDT", "-0800"),
    ("YST", "-0900"),
    ("ZP4", "+0400"),
    ("ZP5", "+0500"),
    ("ZP6", "+0600"),
];

/// Looks up the numeric offset for a zone abbreviation (exact match).
fn zone_offset(abbreviation: &str) -> Option<&'static str> {
    ZONE_OFFSETS
        .iter()
        .find(|(name, _)| *name == abbreviation)
        .map(|(_, offset)| *offset)
}

/// Replaces a trailing named time zone with its numeric offset.
///
/// Only the final whitespace-delimited token is considered, and only on an
/// exact table match. Substituting anywhere else could corrupt unrelated
/// text that happens to contain an abbreviation as a substring.
pub(crate) fn clean_time_zone(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some((head, tail)) = trimmed.rsplit_once(|c: char| c.is_whitespace()) else {
        return trimmed.to_string();
    };
    match zone_offset(tail) {
        Some(offset) => format!("{} {offset}", head.trim_end()),
        None => trimmed.to_string(),
    }
}

/// Parses a feed `pubDate` string into a UTC instant.
///
/// Tries the two-digit-day layout first, then the single-digit-day fallback.
/// Each layout must match exactly; there is no lenient parsing.
///
/// # Errors
///
/// Returns [`DateParseError::Unrecognized`] when neither layout matches.
pub fn try_parse_pub_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let cleaned = clean_time_zone(raw);

    for format in [FORMAT_TWO_DIGIT_DAY, FORMAT_ONE_DIGIT_DAY] {
        if let Ok(parsed) = DateTime::parse_from_str(&cleaned, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    Err(DateParseError::Unrecognized {
        raw: raw.to_string(),
    })
}

/// Parses a feed `pubDate` string, falling back to the Unix epoch sentinel.
///
/// Feeds are full of dates no strict parser accepts; an unreadable date must
/// not stop the run, so callers get the epoch instead of an error.
#[must_use]
pub fn parse_pub_date(raw: &str) -> DateTime<Utc> {
    try_parse_pub_date(raw).unwrap_or(DateTime::UNIX_EPOCH)
}
