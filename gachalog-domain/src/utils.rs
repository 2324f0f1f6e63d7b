// Time and lenient-field helpers shared by the record schema

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Offset of the reference zone used for naive persisted times and display.
pub const REFERENCE_OFFSET_SECONDS: i32 = 8 * 3600;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Parses an RFC 3339 timestamp, or a naive one interpreted in the reference zone.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }
    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .and_then(|naive| reference_offset().from_local_datetime(&naive).single())
    })
}

pub fn format_display_time(time: &DateTime<FixedOffset>) -> String {
    format!(
        "{} UTC+8",
        time.with_timezone(&reference_offset())
            .format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Signed(value) => value.to_string(),
        StringOrNumber::Unsigned(value) => value.to_string(),
    })
}

/// Rarity arrives as `5` or `"5"` depending on the exporter.
pub fn deserialize_rank<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = deserialize_string_or_number(deserializer)?;
    let rank: u8 = raw
        .trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("invalid rank_type '{}'", raw)))?;
    if rank == 0 {
        return Err(D::Error::custom("rank_type must be positive"));
    }
    Ok(rank)
}
