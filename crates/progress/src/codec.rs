//! Encoding of a user's record set to and from its stored blob.

use std::collections::HashSet;
use lms_core::{CompletionRecord, UserId};
use serde_json::Value;

/// Outcome of reading one user's record set.
///
/// Callers that only want records use [`RecordLoad::into_records`]; every
/// variant other than `Loaded` degrades to "nothing completed yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLoad {
    /// Nothing stored for this user
    Missing,
    /// No persistence medium
    Unavailable,
    /// The backend failed while reading
    ReadFailed {
        /// Backend message
        reason: String,
    },
    /// Records decoded successfully
    Loaded(Vec<CompletionRecord>),
    /// Stored data could not be decoded
    Corrupt {
        /// Decoder message
        reason: String,
    },
}

impl RecordLoad {
    /// The records, or an empty set for every non-`Loaded` outcome.
    pub fn into_records(self) -> Vec<CompletionRecord> {
        match self {
            RecordLoad::Loaded(records) => records,
            RecordLoad::Missing
            | RecordLoad::Unavailable
            | RecordLoad::ReadFailed { .. }
            | RecordLoad::Corrupt { .. } => Vec::new(),
        }
    }

    /// Whether stored data was present but unreadable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, RecordLoad::Corrupt { .. })
    }
}

/// Records decoded from a blob, plus how many elements were unusable.
#[derive(Debug)]
pub(crate) struct Decoded {
    pub records: Vec<CompletionRecord>,
    pub skipped: usize,
}

/// Decode a stored blob owned by `owner`.
///
/// Only a blob that is not a JSON array fails. Elements are decoded one by
/// one: an element without `userId` is adopted by `owner`, and an element
/// that still does not decode is skipped.
pub(crate) fn decode(bytes: &[u8], owner: &UserId) -> serde_json::Result<Decoded> {
    let elements: Vec<Value> = serde_json::from_slice(bytes)?;
    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = 0;

    for mut element in elements {
        if let Value::Object(fields) = &mut element {
            fields
                .entry("userId")
                .or_insert_with(|| Value::String(owner.to_string()));
        }
        match serde_json::from_value(element) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    Ok(Decoded { records, skipped })
}

/// Encode records for storage.
pub(crate) fn encode(records: &[CompletionRecord]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(records)
}

/// Keep the first record per unit id, preserving order. Returns the number
/// of records dropped.
pub(crate) fn dedupe(records: Vec<CompletionRecord>) -> (Vec<CompletionRecord>, usize) {
    let before = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|r| seen.insert(r.unit_id().clone()))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
