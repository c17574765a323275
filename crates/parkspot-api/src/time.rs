// Backend timestamp handling
//
// The backend emits naive `YYYY-MM-DD HH:MM:SS` strings from its own
// serializers, but Flask's default JSON encoder renders datetimes as
// RFC 2822 (`Wed, 01 Nov 2023 23:59:59 GMT`). Both are accepted, as is
// RFC 3339. Offsets are normalized to UTC and dropped.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Canonical wire format used when serializing.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse any timestamp shape the backend is known to produce.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, WIRE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            DateTime::parse_from_rfc2822(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Serde adapter for `Option<NaiveDateTime>` fields.
///
/// Use with `#[serde(default, with = "crate::time::optional")]`.
pub mod optional {
    use super::{Deserialize, Deserializer, NaiveDateTime, Serializer, WIRE_FORMAT, parse_timestamp};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(WIRE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_timestamp(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {s}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::parse_timestamp;

    fn expected() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 1)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap()
    }

    #[test]
    fn parses_naive_wire_format() {
        assert_eq!(parse_timestamp("2023-11-01 23:59:59"), Some(expected()));
    }

    #[test]
    fn parses_flask_rfc2822() {
        assert_eq!(
            parse_timestamp("Wed, 01 Nov 2023 23:59:59 GMT"),
            Some(expected())
        );
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            parse_timestamp("2023-11-02T01:59:59+02:00"),
            Some(expected())
        );
        assert_eq!(parse_timestamp("2023-11-01T23:59:59"), Some(expected()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
