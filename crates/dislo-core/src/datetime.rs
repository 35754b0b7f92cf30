//! Timestamp codec for Dislo payloads.
//!
//! Dislo renders timestamps as `YYYY-MM-DD HH:MM:SS` in UTC. Decoding also accepts
//! RFC 3339 so payloads produced by other tooling still parse. Encoding always emits
//! the Dislo format, with a fractional part only when the value has sub-second
//! precision, so every decoded timestamp re-encodes to an equal value.
//!
//! Use with `#[serde(with = "crate::datetime")]`, or `crate::datetime::option` for
//! nullable fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format for timestamps. `%.f` is empty for whole seconds.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a Dislo timestamp string.
///
/// # Errors
///
/// Returns the chrono parse error if the input is neither the Dislo format nor RFC 3339.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
}

/// Render a timestamp in the Dislo wire format.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

/// Serialize a timestamp.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

/// Deserialize a timestamp.
///
/// # Errors
///
/// Fails when the input is not a string in a supported format.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Codec for `Option<DateTime<Utc>>`.
///
/// `null`, an absent key (with `#[serde(default)]`), and an empty string all decode to `None`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails when a non-empty string is not in a supported format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.is_empty() => super::parse(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
