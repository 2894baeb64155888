//! # Domain Model: Blog Records
//!
//! A [`BlogRecord`] is the administrative metadata of one blog post: not the post body,
//! just what the backend indexes (title, tags, summary, date and the path of the backing file).
//!
//! ## Identifiers
//!
//! Ids are server-assigned and opaque. Some backends hand out integers, others strings, so
//! [`BlogId`] keeps whichever representation arrived and compares by its textual form:
//! `BlogId::Number(7)` and `BlogId::Text("7")` name the same record. This lets users type
//! ids on the command line without knowing how the server encodes them.
//!
//! ## Dates
//!
//! The wire format is an ISO calendar date (`2024-01-31`). Backends that store timestamps
//! frequently answer with a full RFC 3339 value instead, so [`parse_date`] accepts both and
//! keeps only the calendar date. Outgoing dates are always plain `YYYY-MM-DD`.
//!
//! ## Tags
//!
//! Tags are a single free-text field holding comma-separated labels. The client never
//! restructures them; [`tag_labels`] only splits them for display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlogId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogId::Number(n) => write!(f, "{}", n),
            BlogId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for BlogId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for BlogId {}

impl Hash for BlogId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl FromStr for BlogId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Only canonical integers become numbers, so "007" still matches a text id "007".
        Ok(match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => BlogId::Number(n),
            _ => BlogId::Text(s.to_string()),
        })
    }
}

impl From<i64> for BlogId {
    fn from(n: i64) -> Self {
        BlogId::Number(n)
    }
}

impl From<&str> for BlogId {
    fn from(s: &str) -> Self {
        BlogId::Text(s.to_string())
    }
}

/// A blog record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub id: BlogId,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub tags: String,
    pub summary: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub file_path: String,
}

impl BlogRecord {
    /// The editable part of the record, without the server-assigned id.
    pub fn draft(&self) -> BlogDraft {
        BlogDraft {
            title: self.title.clone(),
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            date: self.date,
            file_path: self.file_path.clone(),
        }
    }
}

/// A record body as sent on create, and (with its id) on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogDraft {
    pub title: String,
    pub tags: String,
    pub summary: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub file_path: String,
}

impl BlogDraft {
    pub fn into_record(self, id: BlogId) -> BlogRecord {
        BlogRecord {
            id,
            title: self.title,
            tags: self.tags,
            summary: self.summary,
            date: self.date,
            file_path: self.file_path,
        }
    }
}

/// Splits the comma-separated tag field into trimmed, non-empty labels.
pub fn tag_labels(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses an ISO date, or the date part of an ISO timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub mod iso_date {
    use super::{parse_date, ISO_DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(ISO_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decodes_record_with_numeric_id() {
        let record: BlogRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "tags": "rust, cli",
            "summary": "short",
            "date": "2024-01-01",
            "file_path": "posts/a.md"
        }))
        .unwrap();

        assert_eq!(record.id, BlogId::Number(1));
        assert_eq!(record.date, date(2024, 1, 1));
        assert_eq!(record.tags, "rust, cli");
    }

    #[test]
    fn decodes_timestamp_dates_and_null_tags() {
        let record: BlogRecord = serde_json::from_value(json!({
            "id": "abc",
            "title": "B",
            "tags": null,
            "summary": "s",
            "date": "2024-03-05T10:20:30.000Z",
            "file_path": "b.md"
        }))
        .unwrap();

        assert_eq!(record.id, BlogId::Text("abc".into()));
        assert_eq!(record.date, date(2024, 3, 5));
        assert_eq!(record.tags, "");
    }

    #[test]
    fn rejects_unparseable_date() {
        let result = serde_json::from_value::<BlogRecord>(json!({
            "id": 1, "title": "A", "summary": "s", "date": "yesterday", "file_path": "a"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn draft_serializes_plain_iso_date_without_id() {
        let draft = BlogDraft {
            title: "T".into(),
            tags: "".into(),
            summary: "S".into(),
            date: date(2023, 12, 9),
            file_path: "t.md".into(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["date"], "2023-12-09");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn ids_compare_by_textual_form() {
        assert_eq!(BlogId::Number(7), BlogId::Text("7".into()));
        assert_ne!(BlogId::Number(7), BlogId::Number(8));

        let mut set = HashSet::new();
        set.insert(BlogId::Number(7));
        assert!(set.contains(&BlogId::Text("7".into())));
    }

    #[test]
    fn ids_parse_numbers_first() {
        assert_eq!("42".parse::<BlogId>().unwrap(), BlogId::Number(42));
        assert!(matches!(
            "post-42".parse::<BlogId>().unwrap(),
            BlogId::Text(ref s) if s == "post-42"
        ));
    }

    #[test]
    fn non_canonical_numbers_stay_text() {
        let server: BlogId = serde_json::from_str("\"007\"").unwrap();
        assert_eq!("007".parse::<BlogId>().unwrap(), server);
        assert_ne!("007".parse::<BlogId>().unwrap(), BlogId::Number(7));
        assert_eq!("+5".parse::<BlogId>().unwrap(), BlogId::Text("+5".into()));
        assert_eq!("-0".parse::<BlogId>().unwrap(), BlogId::Text("-0".into()));
        assert_eq!("-3".parse::<BlogId>().unwrap(), BlogId::Number(-3));
    }

    #[test]
    fn tag_labels_skip_blank_entries() {
        assert_eq!(tag_labels(" rust ,, web,"), vec!["rust", "web"]);
        assert!(tag_labels("").is_empty());
    }
}
