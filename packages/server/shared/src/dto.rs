use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date `{0}` (expected RFC 3339 or YYYY-MM-DD)")]
pub struct InvalidDate(pub String);

/// A publish date as accepted from clients: a full RFC 3339 timestamp,
/// a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) or a plain date at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct PublishDate(pub DateTime<Utc>);

impl FromStr for PublishDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(Utc.from_utc_datetime(&naive)));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for PublishDate {
    type Error = InvalidDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PublishDate> for DateTime<Utc> {
    fn from(value: PublishDate) -> Self {
        value.0
    }
}

/// Absent and blank dates are both treated as "not provided".
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<PublishDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookPayload {
    pub title: String,
    pub genre: String,
    pub publish_date: PublishDate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookPayload {
    pub title: Option<String>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub publish_date: Option<PublishDate>,
}

/// Query string of `GET /books`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilterQuery {
    pub author_id: Option<Uuid>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub publish_date: Option<PublishDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookNoteResponse {
    pub note: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publish_date_formats() {
        let expected = Utc.with_ymd_and_hms(2017, 9, 10, 0, 0, 0).unwrap();
        assert_eq!("2017-09-10".parse::<PublishDate>().unwrap().0, expected);
        assert_eq!(
            "2017-09-10T00:00:00.000Z".parse::<PublishDate>().unwrap().0,
            expected
        );
        assert_eq!(
            "2017-09-10T02:00:00+02:00".parse::<PublishDate>().unwrap().0,
            expected
        );
        assert_eq!(
            "2017-09-10T00:00:00".parse::<PublishDate>().unwrap().0,
            expected
        );
    }

    #[test]
    fn test_publish_date_rejects_garbage() {
        assert!("last tuesday".parse::<PublishDate>().is_err());
        assert!("2017-13-40".parse::<PublishDate>().is_err());
    }

    #[test]
    fn test_create_payload_is_camel_case() {
        let payload: CreateBookPayload = serde_json::from_value(json!({
            "title": "Clean Code",
            "genre": "IT",
            "publishDate": "2008-07-01"
        }))
        .unwrap();
        assert_eq!(payload.title, "Clean Code");
        assert_eq!(
            payload.publish_date.0,
            Utc.with_ymd_and_hms(2008, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_create_payload_requires_publish_date() {
        let result = serde_json::from_value::<CreateBookPayload>(json!({
            "title": "Clean Code",
            "genre": "IT"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_payload_ignores_blank_date() {
        let payload: UpdateBookPayload = serde_json::from_value(json!({
            "title": "Test2",
            "publishDate": ""
        }))
        .unwrap();
        assert_eq!(payload.title.as_deref(), Some("Test2"));
        assert!(payload.publish_date.is_none());
        assert!(payload.genre.is_none());
    }

    #[test]
    fn test_filter_query_defaults() {
        let query: BookFilterQuery = serde_json::from_value(json!({ "genre": "IT" })).unwrap();
        assert_eq!(query.genre.as_deref(), Some("IT"));
        assert!(query.author_id.is_none());
        assert!(query.publish_date.is_none());
    }
}
