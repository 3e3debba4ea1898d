use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::sort::SortMode;

/// Prefix marking a label as the item's assignee (`@alice`)
pub const ASSIGNEE_SIGIL: char = '@';

/// Label marking an item as disputed
pub const DISPUTED_LABEL: &str = "disputed";

/// Lifecycle status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
    Deleted,
    /// Hidden by the backend until its wait date
    Waiting,
    /// Template the backend spawns recurring instances from
    Recurring,
}

impl Status {
    /// Whether items in this status take part in review
    pub fn is_reviewable(self) -> bool {
        matches!(self, Status::Pending | Status::Completed)
    }
}

/// The reserved color vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }

    /// Parse a label into a color, if it is one of the reserved color labels
    pub fn from_label(label: &str) -> Option<Color> {
        match label {
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            _ => None,
        }
    }

    /// Rank used by color sort: red < blue < green
    pub fn rank(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
        }
    }
}

/// One tracked item, in the backend's export/import wire shape.
///
/// Fields the review console does not understand are kept in `extra` so that
/// writing an item back never drops backend-owned data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity; `None` for an item not yet created in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Short display id (0 or absent for completed items)
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<u64>,
    pub status: Status,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "stamp::option")]
    pub entry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "stamp::option")]
    pub end: Option<DateTime<Utc>>,
    /// Last-modified stamp, kept verbatim: it is the concurrency token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "stamp::option")]
    pub reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub urgency: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    /// A brand-new pending item with no identity yet
    pub fn new(description: String) -> Self {
        Item {
            uuid: None,
            short_id: None,
            status: Status::Pending,
            description,
            project: None,
            entry: None,
            end: None,
            modified: None,
            reviewed: None,
            urgency: 0.0,
            tags: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// The first reserved color label present
    pub fn color_label(&self) -> Option<Color> {
        self.tags.iter().find_map(|t| Color::from_label(t))
    }

    /// The first sigil-prefixed label present, including the sigil
    pub fn assignee_label(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.starts_with(ASSIGNEE_SIGIL))
            .map(|t| t.as_str())
    }

    /// Assignee name without the sigil
    pub fn assignee(&self) -> Option<&str> {
        self.assignee_label().map(|l| &l[ASSIGNEE_SIGIL.len_utf8()..])
    }

    pub fn is_disputed(&self) -> bool {
        self.has_tag(DISPUTED_LABEL)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Review state.
    ///
    /// Open items carry a decaying `reviewed` marker which counts for `window`
    /// after it was set. Completed items are reviewed once they carry the
    /// reviewer's tag, which never decays.
    pub fn is_reviewed(&self, now: DateTime<Utc>, window: Duration, review_tag: &str) -> bool {
        if self.end.is_none() {
            self.reviewed.is_some_and(|marker| now - marker < window)
        } else {
            self.has_tag(review_tag)
        }
    }

    /// Completion time if present, else creation time
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.end.or(self.entry)
    }

    pub fn sort_key(&self, mode: SortMode) -> SortKey {
        match mode {
            SortMode::Urgency => SortKey::Urgency(self.urgency),
            SortMode::Recency => SortKey::Recency(self.recency()),
            SortMode::Color => SortKey::Color(self.color_label().map_or(u8::MAX, Color::rank)),
        }
    }
}

/// Per-mode sort key for an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey {
    Urgency(f64),
    Recency(Option<DateTime<Utc>>),
    Color(u8),
}

impl SortKey {
    /// Ordering in which items are displayed: highest urgency first, most
    /// recent first, then red < blue < green < uncolored.
    pub fn display_cmp(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Urgency(a), SortKey::Urgency(b)) => b.total_cmp(a),
            (SortKey::Recency(a), SortKey::Recency(b)) => b.cmp(a),
            (SortKey::Color(a), SortKey::Color(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Backend timestamp encoding (`20240131T154502Z`)
pub mod stamp {
    use chrono::{DateTime, NaiveDateTime, Utc};

    pub const FORMAT: &str = "%Y%m%dT%H%M%SZ";

    pub fn format(t: &DateTime<Utc>) -> String {
        t.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, FORMAT).map(|n| n.and_utc())
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(t) => serializer.serialize_str(&super::format(t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
