//! Lenient codec for the `created_at` field.
//!
//! The server stores naive UTC timestamps (`2024-10-31T19:05:00.123456`), but
//! RFC 3339 strings are accepted as well. A value that matches none of the
//! known layouts decodes to `None` rather than failing the whole payload.

use serde::{Deserialize, Deserializer, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const NAIVE_LAYOUTS: [&[FormatItem<'static>]; 4] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

pub fn parse(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| PrimitiveDateTime::parse(raw, layout).ok())
        .map(PrimitiveDateTime::assume_utc)
}

pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.and_then(|ts| ts.format(&Rfc3339).ok()) {
        Some(formatted) => serializer.serialize_some(&formatted),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}
