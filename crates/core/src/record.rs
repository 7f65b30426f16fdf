//! Completion record model - one learner's state for one unit.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::id::{UnitId, UserId};
use crate::Time;

/// Completion state of a single (user, unit) pair.
///
/// The unit id is serialized as `chapterId`, the name existing stored data
/// uses. `completedAt` is present iff `completed` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    user_id: UserId,

    #[serde(rename = "chapterId")]
    unit_id: UnitId,

    completed: bool,

    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_millis")]
    completed_at: Option<Time>,
}

impl CompletionRecord {
    /// Create a record for a unit completed at `at`.
    pub fn completed(user_id: UserId, unit_id: UnitId, at: Time) -> Self {
        Self {
            user_id,
            unit_id,
            completed: true,
            completed_at: Some(at),
        }
    }

    /// Create a record for a unit that is not completed.
    pub fn incomplete(user_id: UserId, unit_id: UnitId) -> Self {
        Self {
            user_id,
            unit_id,
            completed: false,
            completed_at: None,
        }
    }

    /// The learner this record belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The unit this record tracks.
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// Whether the unit has been marked done.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// When the unit was last marked done.
    pub fn completed_at(&self) -> Option<Time> {
        self.completed_at
    }

    /// Mark the unit done at `at`, keeping the ids.
    pub fn mark_completed(&mut self, at: Time) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Mark the unit not done and clear the timestamp.
    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }
}

/// Stored shape, accepted leniently on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    user_id: UserId,

    #[serde(rename = "chapterId", alias = "curriculumId")]
    unit_id: UnitId,

    #[serde(default)]
    completed: bool,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    completed_at: Option<Time>,
}

/// Timestamps are written the way browsers write them: UTC, milliseconds, `Z`.
fn serialize_millis<S: Serializer>(at: &Option<Time>, serializer: S) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

/// An unparseable timestamp string reads as absent rather than failing the record.
fn deserialize_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Time>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|at| at.with_timezone(&chrono::Utc))
    }))
}

impl From<WireRecord> for CompletionRecord {
    fn from(wire: WireRecord) -> Self {
        Self {
            user_id: wire.user_id,
            unit_id: wire.unit_id,
            completed: wire.completed,
            // A stale timestamp on an incomplete record is dropped.
            completed_at: if wire.completed { wire.completed_at } else { None },
        }
    }
}
