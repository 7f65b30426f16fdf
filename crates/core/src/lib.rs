//! LMS core data models.
//!
//! This crate defines the data structures behind learner progress tracking:
//! identifiers, per-unit completion records and course aggregates.

#![warn(missing_docs)]

// Identities
mod id;

// Completion tracking
mod record;
mod course;

// Re-exports
pub use id::{IdError, UnitId, UserId};
pub use record::CompletionRecord;
pub use course::{completion_percentage, CourseProgress};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
