//! Progress store errors.

use lms_core::UserId;
use lms_storage::StorageError;

/// Error type for progress store writes.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors a mutating progress operation can return.
///
/// Reads never fail, and an unavailable storage medium is never reported.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The backend failed for a reason other than being unavailable
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The record set could not be serialized
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),

    /// A bulk replace included a record owned by another user
    #[error("record for user {found} cannot be stored under user {expected}")]
    ForeignRecord {
        /// User whose set was being replaced
        expected: UserId,
        /// Owner of the offending record
        found: UserId,
    },
}
