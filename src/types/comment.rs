//! Comment types for flattened threads.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for a comment.
///
/// Opaque string assigned by the comment store. Implements `Ord` so that
/// maps keyed by it iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Create a new CommentId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Author of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Author identity.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Avatar URL (may be empty).
    #[serde(default)]
    pub picture: String,
}

impl User {
    /// Create a new user record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, picture: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            picture: picture.into(),
        }
    }
}

/// A single comment as supplied by the comment store.
///
/// Only the fields needed for counting, flattening and mention resolution
/// are kept; everything else in the store's JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Parent comment, `None` for top-level comments.
    #[serde(default, deserialize_with = "deserialize_pid", skip_serializing_if = "Option::is_none")]
    pub pid: Option<CommentId>,
    /// Creation time, ISO-8601 / RFC 3339.
    #[serde(default)]
    pub time: String,
    /// Whether the comment is hidden from display.
    #[serde(default)]
    pub hidden: bool,
    /// Author of the comment.
    #[serde(default)]
    pub user: User,
}

impl Comment {
    /// Create a new top-level comment.
    pub fn new(id: impl Into<CommentId>, time: impl Into<String>, user: User) -> Self {
        Self {
            id: id.into(),
            pid: None,
            time: time.into(),
            hidden: false,
            user,
        }
    }

    /// Create a reply to `pid`.
    pub fn reply(
        id: impl Into<CommentId>,
        pid: impl Into<CommentId>,
        time: impl Into<String>,
        user: User,
    ) -> Self {
        Self {
            pid: Some(pid.into()),
            ..Self::new(id, time, user)
        }
    }

    /// Mark the comment hidden (or visible).
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Whether this is a top-level comment.
    pub fn is_top_level(&self) -> bool {
        self.pid.is_none()
    }

    /// Creation instant in milliseconds since the Unix epoch.
    ///
    /// Missing or unparsable times sort as the epoch (0).
    pub fn timestamp_millis(&self) -> i64 {
        parse_time_millis(&self.time).unwrap_or(0)
    }
}

/// Parse an ISO-like timestamp into milliseconds since the Unix epoch.
///
/// Accepts RFC 3339 (with offset), naive date-times (read as UTC, `T` or
/// space separated, optional fractional seconds) and bare dates.
pub fn parse_time_millis(time: &str) -> Option<i64> {
    let time = time.trim();
    if time.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(time, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(time, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

// The comment store sends `"pid": ""` for top-level comments.
fn deserialize_pid<'de, D>(deserializer: D) -> Result<Option<CommentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|pid| !pid.is_empty()).map(CommentId))
}
