//! Serde helpers for the text formats of the API
//!
//! Bar dates and quote timestamps travel as `YYYY-MM-DD HH:MM:SS` (no
//! timezone), the format the dashboard already parses.

/// `NaiveDateTime` as `YYYY-MM-DD HH:MM:SS`
pub mod datetime_format {
    use crate::constants::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a `NaiveDateTime` as `YYYY-MM-DD HH:MM:SS`
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
    }

    /// Deserializes `YYYY-MM-DD HH:MM:SS`, also accepting `YYYY-MM-DD`
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_datetime(&text).map_err(serde::de::Error::custom)
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or a bare `YYYY-MM-DD`
pub fn parse_datetime(text: &str) -> Result<chrono::NaiveDateTime, String> {
    use chrono::{NaiveDate, NaiveDateTime};

    let text = text.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(value);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("unable to parse datetime: {text}"))
}
